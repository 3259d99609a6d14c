pub mod gemini_payload;
pub mod gemini_service;
