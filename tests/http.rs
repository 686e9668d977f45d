use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct MoodEntry {
    text: String,
    date: String,
}

#[derive(Debug, Deserialize)]
struct Balance {
    balance_pct: f64,
    status: String,
}

#[derive(Debug, Deserialize)]
struct Dashboard {
    total: usize,
    week_count: usize,
    last_active: String,
    balance: Balance,
}

#[derive(Debug, Deserialize)]
struct Clicks {
    count: u64,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("mood_notepad_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/dashboard")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_mood_notepad"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn list_moods(client: &Client, base_url: &str) -> Vec<MoodEntry> {
    client
        .get(format!("{base_url}/api/moods"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn dashboard(client: &Client, base_url: &str) -> Dashboard {
    client
        .get(format!("{base_url}/api/dashboard"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn add_mood(client: &Client, base_url: &str, text: &str) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/moods"))
        .json(&serde_json::json!({ "text": text }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_add_mood_prepends_and_updates_dashboard() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = list_moods(&client, &server.base_url).await;
    let dashboard_before = dashboard(&client, &server.base_url).await;

    let response = add_mood(&client, &server.base_url, "  feeling happy today  ").await;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let created: MoodEntry = response.json().await.unwrap();
    assert_eq!(created.text, "feeling happy today");

    let after = list_moods(&client, &server.base_url).await;
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after[0].text, "feeling happy today");
    assert_eq!(after[0].date, created.date);

    let dashboard_after = dashboard(&client, &server.base_url).await;
    assert_eq!(dashboard_after.total, dashboard_before.total + 1);
    assert_eq!(dashboard_after.week_count, dashboard_before.week_count + 1);
    assert!(created.date.starts_with(&dashboard_after.last_active));
    assert!(dashboard_after.balance.balance_pct >= dashboard_before.balance.balance_pct);
}

#[tokio::test]
async fn http_blank_mood_is_ignored() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = list_moods(&client, &server.base_url).await;
    let response = add_mood(&client, &server.base_url, "   ").await;
    assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);

    let after = list_moods(&client, &server.base_url).await;
    assert_eq!(after.len(), before.len());
}

#[tokio::test]
async fn http_delete_mood_checks_index() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    add_mood(&client, &server.base_url, "to be removed").await;
    let before = list_moods(&client, &server.base_url).await;

    for bad in [before.len() as i64, -1] {
        let response = client
            .delete(format!("{}/api/moods/{bad}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }
    assert_eq!(list_moods(&client, &server.base_url).await.len(), before.len());

    let removed: MoodEntry = client
        .delete(format!("{}/api/moods/0", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(removed.text, "to be removed");
    assert_eq!(list_moods(&client, &server.base_url).await.len(), before.len() - 1);
}

#[tokio::test]
async fn http_clear_requires_confirmation_and_export_follows() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    add_mood(&client, &server.base_url, "bad day").await;

    let rejected = client
        .delete(format!("{}/api/moods", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(!list_moods(&client, &server.base_url).await.is_empty());

    let cleared = client
        .delete(format!("{}/api/moods?confirm=true", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(cleared.status().is_success());
    assert!(list_moods(&client, &server.base_url).await.is_empty());

    let empty_export = client
        .get(format!("{}/api/moods/export", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(empty_export.status(), reqwest::StatusCode::NO_CONTENT);

    add_mood(&client, &server.base_url, "ok").await;
    add_mood(&client, &server.base_url, "so tired and sad").await;
    let entries = list_moods(&client, &server.base_url).await;

    let export = client
        .get(format!("{}/api/moods/export", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(export.status().is_success());
    let disposition = export
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("diary.txt"));
    let body = export.text().await.unwrap();
    let expected = format!(
        "=== Diary ===\n[{}] {}\n[{}] {}\n",
        entries[0].date, entries[0].text, entries[1].date, entries[1].text
    );
    assert_eq!(body, expected);

    let summary = dashboard(&client, &server.base_url).await;
    assert_eq!(summary.total, 2);
    assert_eq!(summary.balance.status, "negative");
}

#[tokio::test]
async fn http_click_increments_count() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before: Clicks = client
        .get(format!("{}/api/clicks", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/api/click", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let after: Clicks = response.json().await.unwrap();
    assert_eq!(after.count, before.count + 1);
}
