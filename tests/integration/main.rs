//! Integration tests for aossession

mod session_tests {
    use aossession::cache::{CacheStore, FileCacheStore, SessionRecord};
    use aossession::session::{SessionSource, SessionStatus};
    use aossession::transport::{HttpRequest, HttpResponse, Transport};
    use aossession::{AosResult, HostEndpoint, Session};
    use chrono::{Duration, Utc};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Answers from a queue and keeps every request for inspection
    #[derive(Clone, Default)]
    struct FakeController {
        replies: Arc<Mutex<VecDeque<HttpResponse>>>,
        seen: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl FakeController {
        fn reply(&self, status: u16, body: &str) {
            self.replies
                .lock()
                .unwrap()
                .push_back(HttpResponse::new(status, "OK", body));
        }

        fn seen(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for FakeController {
        fn execute(&self, request: HttpRequest) -> AosResult<HttpResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("no reply queued"))
        }
    }

    fn endpoint(cache_dir: &TempDir) -> HostEndpoint {
        HostEndpoint::new("ctrl.example.net", "admin", "secret").with_cache_dir(cache_dir.path())
    }

    fn connect(endpoint: HostEndpoint, controller: &FakeController) -> Session {
        let store = FileCacheStore::new(endpoint.cache_dir.clone().unwrap());
        Session::connect(endpoint, Box::new(controller.clone()), Some(Box::new(store))).unwrap()
    }

    #[test]
    fn login_cache_reuse_and_request() {
        let temp = TempDir::new().unwrap();
        let store = FileCacheStore::new(temp.path());

        // First run: no cache, so a login happens and the token is cached
        let controller = FakeController::default();
        controller.reply(200, r#"{"_global_result": {"UIDARUBA": "tok123"}}"#);
        let session = connect(endpoint(&temp), &controller);

        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(controller.seen().len(), 1);
        let cached = store.load("ctrl.example.net").into_record().unwrap();
        assert_eq!(cached.token, "tok123");

        // Second run with a 10 second old cache: no login
        store
            .save(
                "ctrl.example.net",
                &SessionRecord::issued("tok123", Utc::now() - Duration::seconds(10)),
            )
            .unwrap();
        let controller = FakeController::default();
        let session = connect(endpoint(&temp), &controller);

        assert!(controller.seen().is_empty());
        assert_eq!(session.source(), Some(SessionSource::Cache));
        assert_eq!(session.token(), Some("tok123"));

        controller.reply(200, r#"{"_data": {"version": "8.10.0.7"}}"#);
        let result = session
            .get("showcommand", &[("command", "show version")], None)
            .unwrap();

        assert_eq!(result["_data"]["version"], "8.10.0.7");
        let request = controller.seen().pop().unwrap();
        assert!(request
            .url
            .contains("UIDARUBA=tok123&json=1&command=show+version"));
    }

    #[test]
    fn expired_cache_logs_in_again() {
        let temp = TempDir::new().unwrap();
        let store = FileCacheStore::new(temp.path());
        store
            .save(
                "ctrl.example.net",
                &SessionRecord::issued("old", Utc::now() - Duration::seconds(901)),
            )
            .unwrap();

        let controller = FakeController::default();
        controller.reply(200, r#"{"_global_result": {"UIDARUBA": "new"}}"#);
        let session = connect(endpoint(&temp), &controller);

        assert_eq!(controller.seen().len(), 1);
        assert_eq!(session.token(), Some("new"));
    }

    #[test]
    fn logout_leaves_empty_cache_file() {
        let temp = TempDir::new().unwrap();
        let controller = FakeController::default();
        controller.reply(200, r#"{"_global_result": {"UIDARUBA": "tok"}}"#);
        let mut session = connect(endpoint(&temp), &controller);
        let path = FileCacheStore::new(temp.path()).path_for("ctrl.example.net");

        controller.reply(200, "");
        controller.reply(200, "");
        assert_eq!(session.logout().unwrap(), 200);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        assert_eq!(session.logout().unwrap(), 200);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        assert_eq!(session.status(), SessionStatus::LoggedOut);
    }
}

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Binary isolated from the user's config and environment
    fn aossession(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("aossession");
        cmd.env("AOSSESSION_CONFIG", temp.path().join("config.toml"));
        for var in [
            "AOS_HOST",
            "AOS_PORT",
            "AOS_USERNAME",
            "AOS_PASSWORD",
            "AOS_VERIFY_TLS",
            "AOS_CACHE_DIR",
            "AOS_NO_CACHE",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        aossession(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("ArubaOS 8"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        aossession(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("aossession"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        aossession(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_redacts_password() {
        let temp = TempDir::new().unwrap();
        aossession(&temp)
            .env("AOS_PASSWORD", "hunter2")
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[controller]"))
            .stdout(predicate::str::contains("hunter2").not());
    }

    #[test]
    fn config_set_then_show() {
        let temp = TempDir::new().unwrap();
        aossession(&temp)
            .args(["config", "set", "controller.host", "10.20.30.40"])
            .assert()
            .success();
        aossession(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("10.20.30.40"));
    }

    #[test]
    fn show_without_host_fails() {
        let temp = TempDir::new().unwrap();
        aossession(&temp)
            .args(["show", "show", "version"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Controller host not configured"));
    }

    #[test]
    fn cache_path_is_per_host() {
        let temp = TempDir::new().unwrap();
        let cache_dir = temp.path().join("cache");
        aossession(&temp)
            .args(["--host", "ctrl", "--cache-dir"])
            .arg(&cache_dir)
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("aossession-ctrl.json"));
    }

    #[test]
    fn cache_status_without_session() {
        let temp = TempDir::new().unwrap();
        aossession(&temp)
            .env("AOS_HOST", "ctrl")
            .env("AOS_CACHE_DIR", temp.path().join("cache"))
            .args(["cache", "status"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached session"));
    }

    #[test]
    fn logout_without_cached_session() {
        let temp = TempDir::new().unwrap();
        aossession(&temp)
            .env("AOS_CACHE_DIR", temp.path().join("cache"))
            .args(["--host", "ctrl", "-u", "admin", "logout"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached session"));
    }

    #[test]
    fn invalid_payload_fails_before_connecting() {
        let temp = TempDir::new().unwrap();
        aossession(&temp)
            .args(["--host", "ctrl", "-u", "admin", "post", "object/x", "-d", "{oops"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--data payload"));
    }

    #[test]
    fn put_requires_payload() {
        let temp = TempDir::new().unwrap();
        aossession(&temp)
            .args(["--host", "ctrl", "-u", "admin", "put", "object/x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("put requires"));
    }
}
