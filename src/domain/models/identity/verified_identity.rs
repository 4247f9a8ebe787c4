//! 외부 신원 제공자가 검증한 신원 정보

/// 서명, audience, issuer, 만료 검증을 모두 통과한 ID 토큰에서 추출한 값
///
/// 이메일이 없거나 제공자가 이메일 미인증으로 표시한 토큰은 이 타입으로
/// 만들어지지 않습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedIdentity {
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub external_subject_id: String,
}
