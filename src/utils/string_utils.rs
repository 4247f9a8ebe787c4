//! 문자열 정리 유틸리티
//!
//! 요청 값의 공백 정리, 로그인 식별자 정규화, 길이 제한 처리에 사용합니다.

use serde::Deserialize;

/// 앞뒤 공백을 제거하고, 비어 있으면 `None`
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 공백만 있는 문자열이 아닌지 확인
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// 로그인 식별자(이메일)를 비교 가능한 형태로 정규화합니다.
///
/// 앞뒤 공백을 제거하고 소문자로 변환합니다.
pub fn normalize_login_identifier(value: &str) -> String {
    value.trim().to_lowercase()
}

/// 최대 `max_chars` 글자까지만 남깁니다. (바이트가 아닌 문자 기준)
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// serde 필드용: 빈 문자열이나 공백 문자열을 `None`으로 역직렬화
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
