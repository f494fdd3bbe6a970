// Existing-document editing: detect bullet blocks in an uploaded PDF and rewrite
// selected blocks in place.

pub mod handlers;
