pub mod method_not_allowed;
pub mod trace_response_body;
