use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{5,16}$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 常见弱密码，比较时忽略大小写
const COMMON_PASSWORDS: &[&str] = &[
    "password1",
    "password123",
    "qwerty123",
    "abcd1234",
    "welcome1",
    "letmein123",
    "iloveyou1",
    "student123",
    "teacher123",
];

/// 课程、测验、资料标题的最大长度
pub const MAX_TITLE_LEN: usize = 150;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username must be 5-16 characters of letters, numbers, underscores or hyphens",
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略：至少 8 位，同时包含大写、小写字母和数字，且不是常见弱密码
///
/// 返回所有未满足的条目，以 "; " 连接。
pub fn validate_password(password: &str) -> Result<(), String> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("an uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("a digit");
    }

    if !errors.is_empty() {
        return Err(format!("Password needs {}", errors.join("; ")));
    }

    if COMMON_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        return Err("Password is too common, please choose a stronger password".to_string());
    }

    Ok(())
}

/// 标题必填且不超过 MAX_TITLE_LEN 个字符
pub fn validate_title(title: &str, what: &str) -> Result<(), String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(format!("{what} title is required"));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(format!(
            "{what} title must be at most {MAX_TITLE_LEN} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("a-b-c").is_ok());
        assert!(validate_username("abcd").is_err());
        assert!(validate_username("seventeen_chars_x").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("student@uni.edu").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("x@y").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("SecurePass123").is_ok());

        let err = validate_password("abc").unwrap_err();
        assert!(err.contains("at least 8 characters"));
        assert!(err.contains("an uppercase letter"));
        assert!(err.contains("a digit"));

        assert!(validate_password("ALLUPPER123").is_err());
        assert!(validate_password("Password1").unwrap_err().contains("too common"));
    }

    #[test]
    fn test_title_rules() {
        assert!(validate_title("Intro to Rust", "Course").is_ok());
        assert_eq!(
            validate_title("   ", "Course").unwrap_err(),
            "Course title is required"
        );
        assert!(validate_title(&"x".repeat(151), "Quiz").is_err());
    }
}
