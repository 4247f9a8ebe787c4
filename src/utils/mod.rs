//! 공용 유틸리티

pub mod string_utils;
