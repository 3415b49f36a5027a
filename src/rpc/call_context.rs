use json::JsonValue;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::time::SystemTime;

/// Per-request logging scope. Carries the caller's identity through the
/// solver so every line of one request can be correlated; logs the total
/// duration when dropped. The default context belongs to no request and
/// prints bare messages, which is what the command-line binaries use.
pub struct CallContext {
    client_ip: String,
    request_id: JsonValue,
    method: String,
    start_time: std::time::Instant,
}

impl CallContext {
    pub fn default() -> CallContext {
        CallContext {
            client_ip: String::new(),
            request_id: JsonValue::Null,
            method: String::new(),
            start_time: std::time::Instant::now(),
        }
    }

    pub fn new(client_ip: &str, request_id: &JsonValue, method: &str) -> Self {
        let context = CallContext {
            client_ip: client_ip.to_string(),
            request_id: request_id.clone(),
            method: method.to_string(),
            start_time: std::time::Instant::now(),
        };
        context.log("->", None);
        context
    }

    fn is_anonymous(&self) -> bool {
        self.client_ip.is_empty() && self.request_id.is_null() && self.method.is_empty()
    }

    fn log(&self, prefix: &str, suffix: Option<&str>) {
        let suffix = suffix.unwrap_or("");
        if self.is_anonymous() {
            eprintln!("{}", suffix.trim_start());
            return;
        }
        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        eprintln!(
            "{} {} [{:?}] [{}] [{}] [{}]{}",
            prefix,
            timestamp,
            std::thread::current().id(),
            self.client_ip,
            self.request_id,
            self.method,
            suffix
        );
    }

    pub fn log_message(&self, message: &str) {
        self.log("  ", Some(&format!(" {}", message)));
    }
}

impl Drop for CallContext {
    fn drop(&mut self) {
        if self.is_anonymous() {
            return;
        }
        let call_duration = self.start_time.elapsed().as_millis();
        self.log("<-", Some(&format!(" (took {} ms)", call_duration)));
    }
}

impl Display for CallContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] [{}]", self.client_ip, self.request_id)
    }
}
