use crate::{
    contact::EmailConfig,
    logging::{LogLevel, DEFAULT_LOG_LEVEL},
};

pub const DEFAULT_MOBILE_BREAKPOINT_PX: u32 = 768;
pub const DEFAULT_SCRAMBLE_INTERVAL_MS: u32 = 40;

const MOBILE_BREAKPOINT_PX_BOUNDS: (u32, u32) = (320, 2_048);
const SCRAMBLE_INTERVAL_MS_BOUNDS: (u32, u32) = (10, 500);

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub email: EmailConfig,
    pub mobile_breakpoint_px: u32,
    pub scramble_interval_ms: u32,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl SiteConfig {
    pub fn from_build_env() -> Self {
        Self::from_lookup(|name| {
            let value = match name {
                "EMAILJS_PUBLIC_KEY" => option_env!("EMAILJS_PUBLIC_KEY"),
                "EMAILJS_SERVICE_ID" => option_env!("EMAILJS_SERVICE_ID"),
                "EMAILJS_TEMPLATE_ID" => option_env!("EMAILJS_TEMPLATE_ID"),
                "SITE_MOBILE_BREAKPOINT_PX" => option_env!("SITE_MOBILE_BREAKPOINT_PX"),
                "SITE_SCRAMBLE_INTERVAL_MS" => option_env!("SITE_SCRAMBLE_INTERVAL_MS"),
                "SITE_LOG_LEVEL" => option_env!("SITE_LOG_LEVEL"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let email = EmailConfig {
            public_key: parse_non_empty_string(&lookup, "EMAILJS_PUBLIC_KEY"),
            service_id: parse_non_empty_string(&lookup, "EMAILJS_SERVICE_ID"),
            template_id: parse_non_empty_string(&lookup, "EMAILJS_TEMPLATE_ID"),
        };
        let mobile_breakpoint_px = parse_u32_with_bounds(
            &lookup,
            "SITE_MOBILE_BREAKPOINT_PX",
            DEFAULT_MOBILE_BREAKPOINT_PX,
            MOBILE_BREAKPOINT_PX_BOUNDS,
        );
        let scramble_interval_ms = parse_u32_with_bounds(
            &lookup,
            "SITE_SCRAMBLE_INTERVAL_MS",
            DEFAULT_SCRAMBLE_INTERVAL_MS,
            SCRAMBLE_INTERVAL_MS_BOUNDS,
        );
        let log_level = parse_non_empty_string(&lookup, "SITE_LOG_LEVEL")
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            email,
            mobile_breakpoint_px,
            scramble_interval_ms,
            log_level,
        }
    }
}

fn parse_non_empty_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u32_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u32,
    bounds: (u32, u32),
) -> u32 {
    lookup(name)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}
