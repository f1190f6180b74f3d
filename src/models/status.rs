use std::fmt;

/// Health/result level shown by status dots and badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum StatusCode {
    Ok,
    Warning,
    Critical,
    #[default]
    Unknown,
    Info,
}

impl StatusCode {
    pub fn label(self) -> &'static str {
        match self {
            StatusCode::Ok => "ok",
            StatusCode::Warning => "warning",
            StatusCode::Critical => "critical",
            StatusCode::Unknown => "unknown",
            StatusCode::Info => "info",
        }
    }

    /// Numeric code, also used as the sort key of health columns
    pub fn code(self) -> u8 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::Warning => 1,
            StatusCode::Critical => 2,
            StatusCode::Unknown => 3,
            StatusCode::Info => 4,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(StatusCode::default(), StatusCode::Unknown);
        assert_eq!(StatusCode::Ok.code(), 0);
        assert_eq!(StatusCode::Info.code(), 4);
        assert_eq!(StatusCode::Critical.to_string(), "critical");
    }
}
