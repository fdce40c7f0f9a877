use vault_chat_model::ErrorKind;

/// Returns a user-facing explanation for a failed model call.
pub fn model_error_hint(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Unauthorized => {
            "Your API key appears to be invalid or expired. Check \
             OPENAI_API_KEY."
        }
        ErrorKind::RateLimitExceeded => {
            "Rate limit exceeded or quota issues with your account."
        }
        ErrorKind::ModelNotFound => {
            "The model was not found. Pick a different one with OPENAI_MODEL."
        }
        ErrorKind::Timeout => "The request timed out. Please try again.",
        ErrorKind::Other => "Could not get a reply from the model.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_mention_the_fix() {
        assert!(model_error_hint(ErrorKind::Unauthorized).contains("API key"));
        assert!(model_error_hint(ErrorKind::ModelNotFound).contains("MODEL"));
        assert!(model_error_hint(ErrorKind::Timeout).contains("try again"));
    }
}
