use async_trait::async_trait;
use common::utils::Platform;
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};
use urlencoding::encode;

/// A hand-off to another installed application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Mail {
        to: String,
        subject: String,
        body: Option<String>,
    },
    Sms {
        to: String,
        body: String,
    },
    Tel {
        number: String,
    },
    WhatsApp {
        phone: String,
        text: String,
    },
}

impl Intent {
    /// Human name of the action, used in alerts.
    pub fn action(&self) -> &'static str {
        match self {
            Intent::Mail { .. } => "Email",
            Intent::Sms { .. } => "SMS",
            Intent::Tel { .. } => "Calling",
            Intent::WhatsApp { .. } => "WhatsApp",
        }
    }

    pub fn to_url(&self, platform: Platform) -> String {
        match self {
            Intent::Mail { to, subject, body } => {
                let mut url = format!("mailto:{}?subject={}", encode(to), encode(subject));
                if let Some(body) = body {
                    url.push_str("&body=");
                    url.push_str(&encode(body));
                }
                url
            }
            Intent::Sms { to, body } => {
                let to = strip_whitespace(to);
                // iOS takes the body after '&', everyone else after '?'.
                let sep = if platform == Platform::Ios { '&' } else { '?' };
                format!("sms:{}{}body={}", to, sep, encode(body))
            }
            Intent::Tel { number } => match platform {
                Platform::Ios => format!("telprompt:{}", number),
                _ => format!("tel:{}", number),
            },
            Intent::WhatsApp { phone, text } => {
                format!("https://wa.me/{}?text={}", strip_whitespace(phone), encode(text))
            }
        }
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    Supported,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opened {
    pub url: String,
}

#[derive(Debug, Error)]
pub enum IntentError {
    #[error("{action} is not supported on this device")]
    Unsupported { action: &'static str, url: String },
    #[error("Failed to open {url}: {reason}")]
    Launch { url: String, reason: String },
}

/// Platform URL-opening capability: a support check followed by the launch.
#[async_trait]
pub trait IntentOpener: Send + Sync {
    async fn check(&self, url: &str) -> Support;

    async fn invoke(&self, url: &str) -> Result<(), IntentError>;

    async fn open(&self, intent: &Intent, platform: Platform) -> Result<Opened, IntentError> {
        let url = intent.to_url(platform);

        if self.check(&url).await == Support::Unsupported {
            warn!("No handler registered for {}", url);
            return Err(IntentError::Unsupported {
                action: intent.action(),
                url,
            });
        }

        self.invoke(&url).await?;
        info!("Opened {} intent", intent.action());
        Ok(Opened { url })
    }
}

/// Opens URLs with the desktop's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

#[async_trait]
impl IntentOpener for SystemOpener {
    async fn check(&self, url: &str) -> Support {
        let scheme = url.split(':').next().unwrap_or_default().to_lowercase();
        if scheme == "http" || scheme == "https" {
            return Support::Supported;
        }
        has_scheme_handler(&scheme).await
    }

    async fn invoke(&self, url: &str) -> Result<(), IntentError> {
        let mut command = launch_command(url).ok_or_else(|| IntentError::Launch {
            url: url.to_string(),
            reason: "no URL launcher on this platform".to_string(),
        })?;

        command.spawn().map(|_| ()).map_err(|e| IntentError::Launch {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(target_os = "linux")]
async fn has_scheme_handler(scheme: &str) -> Support {
    let output = Command::new("xdg-mime")
        .args(["query", "default", &format!("x-scheme-handler/{}", scheme)])
        .output()
        .await;

    match output {
        Ok(out) if out.status.success() && !String::from_utf8_lossy(&out.stdout).trim().is_empty() => {
            Support::Supported
        }
        _ => Support::Unsupported,
    }
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
async fn has_scheme_handler(_scheme: &str) -> Support {
    // The OS shows its own chooser when nothing is registered.
    Support::Supported
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
async fn has_scheme_handler(_scheme: &str) -> Support {
    Support::Unsupported
}

#[cfg(target_os = "linux")]
fn launch_command(url: &str) -> Option<Command> {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    Some(command)
}

#[cfg(target_os = "macos")]
fn launch_command(url: &str) -> Option<Command> {
    let mut command = Command::new("open");
    command.arg(url);
    Some(command)
}

#[cfg(target_os = "windows")]
fn launch_command(url: &str) -> Option<Command> {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    Some(command)
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn launch_command(_url: &str) -> Option<Command> {
    None
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records launched URLs instead of starting anything.
    pub(crate) struct RecordingOpener {
        pub supported: bool,
        pub launched: Mutex<Vec<String>>,
    }

    impl RecordingOpener {
        pub fn new(supported: bool) -> Self {
            RecordingOpener {
                supported,
                launched: Mutex::new(Vec::new()),
            }
        }

        pub fn launched(&self) -> Vec<String> {
            self.launched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IntentOpener for RecordingOpener {
        async fn check(&self, _url: &str) -> Support {
            if self.supported {
                Support::Supported
            } else {
                Support::Unsupported
            }
        }

        async fn invoke(&self, url: &str) -> Result<(), IntentError> {
            self.launched.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    #[test]
    fn mail_url_encodes_every_part() {
        let intent = Intent::Mail {
            to: "support@zyvastra.com".to_string(),
            subject: "Enquiry: Polo Shirts".to_string(),
            body: Some("Name: Jane\nQty: 500".to_string()),
        };
        assert_eq!(
            intent.to_url(Platform::Web),
            "mailto:support%40zyvastra.com?subject=Enquiry%3A%20Polo%20Shirts&body=Name%3A%20Jane%0AQty%3A%20500"
        );

        let no_body = Intent::Mail {
            to: "a@b.co".to_string(),
            subject: "Hi".to_string(),
            body: None,
        };
        assert_eq!(no_body.to_url(Platform::Android), "mailto:a%40b.co?subject=Hi");
    }

    #[test]
    fn sms_separator_depends_on_platform() {
        let intent = Intent::Sms {
            to: "+91 74280 73088".to_string(),
            body: "hello there".to_string(),
        };
        assert_eq!(intent.to_url(Platform::Ios), "sms:+917428073088&body=hello%20there");
        assert_eq!(intent.to_url(Platform::Android), "sms:+917428073088?body=hello%20there");
        assert_eq!(intent.to_url(Platform::Web), "sms:+917428073088?body=hello%20there");
    }

    #[test]
    fn tel_and_whatsapp_urls() {
        let tel = Intent::Tel {
            number: "+917428073088".to_string(),
        };
        assert_eq!(tel.to_url(Platform::Ios), "telprompt:+917428073088");
        assert_eq!(tel.to_url(Platform::Android), "tel:+917428073088");

        let wa = Intent::WhatsApp {
            phone: "+91 7428073088".to_string(),
            text: "Hi! I have a query".to_string(),
        };
        assert_eq!(
            wa.to_url(Platform::Web),
            "https://wa.me/+917428073088?text=Hi%21%20I%20have%20a%20query"
        );
    }

    #[tokio::test]
    async fn unsupported_intent_is_never_invoked() {
        let opener = RecordingOpener::new(false);
        let intent = Intent::Tel {
            number: "123".to_string(),
        };

        let err = opener.open(&intent, Platform::Android).await.unwrap_err();
        assert!(matches!(err, IntentError::Unsupported { action: "Calling", .. }));
        assert!(opener.launched().is_empty());
    }

    #[tokio::test]
    async fn supported_intent_is_invoked_once() {
        let opener = RecordingOpener::new(true);
        let intent = Intent::WhatsApp {
            phone: "+1 555".to_string(),
            text: "hi".to_string(),
        };

        let opened = opener.open(&intent, Platform::Web).await.unwrap();
        assert_eq!(opened.url, "https://wa.me/+1555?text=hi");
        assert_eq!(opener.launched(), vec![opened.url]);
    }
}
