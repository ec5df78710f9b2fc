use serde::{Deserialize, Serialize};

/// Deployment environment that selects the API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Local,
    Dev,
    Prod,
}

/// Platform flavour, used where intent URL schemes differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Web,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else {
            Platform::Web
        }
    }
}

/// Channel a contact enquiry is sent through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMode {
    Sms,
    Email,
}

impl_from_str_for_enum!(Profile, Local => "local", Dev => "dev", Prod => "prod");
impl_display_for_enum!(Profile, Local => "local", Dev => "dev", Prod => "prod");
impl_from_str_for_enum!(Platform, Ios => "ios", Android => "android", Web => "web");
impl_display_for_enum!(Platform, Ios => "ios", Android => "android", Web => "web");
impl_from_str_for_enum!(ContactMode, Sms => "sms", Email => "email");
impl_display_for_enum!(ContactMode, Sms => "sms", Email => "email");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_profiles_case_insensitively() {
        assert_eq!("LOCAL".parse::<Profile>().unwrap(), Profile::Local);
        assert_eq!(" prod ".parse::<Profile>().unwrap(), Profile::Prod);
        assert!("staging".parse::<Profile>().is_err());
        assert_eq!(Profile::Dev.to_string(), "dev");
    }

    #[test]
    fn contact_mode_round_trips_through_display() {
        let mode: ContactMode = ContactMode::Email.to_string().parse().unwrap();
        assert_eq!(mode, ContactMode::Email);
    }
}
