//! In-memory port fakes

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use t3tracker_core::{
    AuthGateway, ElapsedDisplay, HostPorts, ProjectDirectory, RuntimeClock, SystemInfoProvider,
    TimeWindowSender,
};
use t3tracker_domain::{
    Project, Result, SystemSnapshot, TaskDetail, TaskSummary, TaskTimeTotal, TimeWindow,
    TrackerError, UserRecord,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Fixed host identity; counts how often it was sampled.
#[derive(Default)]
pub struct FixedSystemInfo {
    pub snapshots: AtomicUsize,
}

impl FixedSystemInfo {
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.load(Ordering::SeqCst)
    }
}

impl SystemInfoProvider for FixedSystemInfo {
    fn snapshot(&self) -> SystemSnapshot {
        self.snapshots.fetch_add(1, Ordering::SeqCst);
        SystemSnapshot {
            computer: Some("test-host".into()),
            user: Some("tester".into()),
            domain: None,
            os: Some("Linux".into()),
            os_version: Some("6.8.0".into()),
            hwid: Some("0x0242ac110002".into()),
        }
    }

    fn timezone_offset_millis(&self) -> i64 {
        -3_600_000
    }
}

/// Records submitted windows; results are scripted per call, then succeed.
#[derive(Default)]
pub struct RecordingSender {
    pub windows: Mutex<Vec<TimeWindow>>,
    pub script: Mutex<VecDeque<Result<()>>>,
}

impl RecordingSender {
    pub fn failing_first() -> Self {
        let sender = Self::default();
        sender.script.lock().push_back(Err(TrackerError::Delivery("503 Service Unavailable".into())));
        sender
    }

    pub fn submitted(&self) -> Vec<TimeWindow> {
        self.windows.lock().clone()
    }
}

#[async_trait]
impl TimeWindowSender for RecordingSender {
    async fn submit_time_window(&self, window: &TimeWindow) -> Result<()> {
        self.windows.lock().push(window.clone());
        self.script.lock().pop_front().unwrap_or(Ok(()))
    }
}

/// Forwards every displayed value to a channel the test can await.
pub struct ChannelDisplay {
    tx: UnboundedSender<u64>,
}

impl ChannelDisplay {
    pub fn new() -> (Self, UnboundedReceiver<u64>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ElapsedDisplay for ChannelDisplay {
    fn show_elapsed(&self, elapsed_seconds: u64) {
        let _ = self.tx.send(elapsed_seconds);
    }
}

/// Accepts one email/password pair.
pub struct FakeAuth {
    pub user: UserRecord,
    pub password: String,
    pub signed_in: Mutex<bool>,
    pub logouts: AtomicUsize,
}

impl FakeAuth {
    pub fn new(user: UserRecord, password: &str, signed_in: bool) -> Self {
        Self {
            user,
            password: password.to_string(),
            signed_in: Mutex::new(signed_in),
            logouts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AuthGateway for FakeAuth {
    async fn current_user(&self) -> Result<Option<UserRecord>> {
        let signed_in = *self.signed_in.lock();
        Ok(signed_in.then(|| self.user.clone()))
    }

    async fn login(&self, email: &str, password: &str) -> Result<()> {
        if self.user.email.as_deref() == Some(email) && password == self.password {
            *self.signed_in.lock() = true;
            Ok(())
        } else {
            Err(TrackerError::Auth("invalid credentials".into()))
        }
    }

    async fn logout(&self) -> Result<()> {
        *self.signed_in.lock() = false;
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Static project/task directory.
#[derive(Default)]
pub struct FakeDirectory {
    pub projects: Vec<Project>,
    pub tasks: HashMap<String, Vec<TaskSummary>>,
    pub details: HashMap<String, TaskDetail>,
    pub totals: HashMap<(String, String), i64>,
}

#[async_trait]
impl ProjectDirectory for FakeDirectory {
    async fn list_assigned_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }

    async fn list_tasks_for_project(&self, project_id: &str) -> Result<Vec<TaskSummary>> {
        Ok(self.tasks.get(project_id).cloned().unwrap_or_default())
    }

    async fn task_detail(&self, task_id: &str) -> Result<TaskDetail> {
        self.details
            .get(task_id)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(format!("task {task_id}")))
    }

    async fn task_time_total(&self, employee_id: &str, task_id: &str) -> Result<TaskTimeTotal> {
        self.totals
            .get(&(employee_id.to_string(), task_id.to_string()))
            .map(|&total_time_millis| TaskTimeTotal { total_time_millis })
            .ok_or_else(|| TrackerError::Network("analytics unavailable".into()))
    }
}

pub fn user() -> UserRecord {
    UserRecord {
        id: "u1".into(),
        name: Some("Alice".into()),
        email: Some("alice@example.com".into()),
        projects: vec!["p1".into()],
    }
}

pub fn task(id: &str, name: &str, assignees: &[&str]) -> TaskSummary {
    TaskSummary {
        id: id.into(),
        name: name.into(),
        assignee_ids: assignees.iter().map(|a| (*a).to_string()).collect(),
    }
}

/// Directory with project `p1` holding two of Alice's tasks and one other.
pub fn directory() -> FakeDirectory {
    let mut directory = FakeDirectory {
        projects: vec![Project { id: "p1".into(), name: "Apollo".into() }],
        ..FakeDirectory::default()
    };
    directory.tasks.insert(
        "p1".into(),
        vec![
            task("t1", "Design", &["u1"]),
            task("t2", "Build", &["u1", "u2"]),
            task("t3", "Review", &["u2"]),
        ],
    );
    directory.details.insert(
        "t1".into(),
        TaskDetail { id: "t1".into(), name: "Design (detailed)".into(), extra: Default::default() },
    );
    directory.totals.insert(("u1".into(), "t1".into()), 5_400_000);
    directory
}

/// Wired host ports plus handles the test inspects.
pub struct Harness {
    pub ports: HostPorts,
    pub auth: Arc<FakeAuth>,
    pub sender: Arc<RecordingSender>,
    pub system_info: Arc<FixedSystemInfo>,
    pub display: UnboundedReceiver<u64>,
}

/// Must be called inside a (paused) tokio runtime; the clock starts at 0.
pub fn harness(sender: RecordingSender, signed_in: bool) -> Harness {
    let auth = Arc::new(FakeAuth::new(user(), "secret", signed_in));
    let sender = Arc::new(sender);
    let system_info = Arc::new(FixedSystemInfo::default());
    let (display, display_rx) = ChannelDisplay::new();

    let ports = HostPorts {
        auth: auth.clone(),
        directory: Arc::new(directory()),
        sender: sender.clone(),
        display: Arc::new(display),
        clock: Arc::new(RuntimeClock::starting_at(0)),
        system_info: system_info.clone(),
    };

    Harness { ports, auth, sender, system_info, display: display_rx }
}
