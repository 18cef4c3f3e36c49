use validator::ValidateUrl;

use crate::error::ServiceError;

pub const MAX_QUESTION_LENGTH: usize = 1000;
pub const MAX_ANSWER_LENGTH: usize = 1000;
pub const MAX_CATEGORY_LENGTH: usize = 100;
pub const MAX_EXPECTED_ANSWERS: usize = 20;
pub const MAX_IMAGE_LINK_LENGTH: usize = 2048;
pub const MAX_DAILY_GOAL_TARGET: i32 = 1000;
pub const MAX_DUE_CARDS_LIMIT: i64 = 500;

fn validate_text(field: &str, value: &str, max: usize) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{field} cannot be empty")));
    }
    if value.chars().count() > max {
        return Err(ServiceError::Validation(format!(
            "{field} must be at most {max} characters long"
        )));
    }
    Ok(())
}

pub fn validate_question(question: &str) -> Result<(), ServiceError> {
    validate_text("Question", question, MAX_QUESTION_LENGTH)
}

pub fn validate_answer(answer: &str) -> Result<(), ServiceError> {
    validate_text("Answer", answer, MAX_ANSWER_LENGTH)
}

pub fn validate_category(category: Option<&str>) -> Result<(), ServiceError> {
    match category {
        Some(category) => validate_text("Category", category, MAX_CATEGORY_LENGTH),
        None => Ok(()),
    }
}

pub fn validate_expected_answers(expected_answers: &[String]) -> Result<(), ServiceError> {
    if expected_answers.len() > MAX_EXPECTED_ANSWERS {
        return Err(ServiceError::Validation(format!(
            "At most {MAX_EXPECTED_ANSWERS} expected answers are allowed"
        )));
    }
    expected_answers
        .iter()
        .try_for_each(|answer| validate_text("Expected answer", answer, MAX_ANSWER_LENGTH))
}

/// Image links must be absolute HTTPS URLs
pub fn validate_image_link(image_link: Option<&str>) -> Result<(), ServiceError> {
    let Some(url) = image_link else {
        return Ok(());
    };

    if url.len() > MAX_IMAGE_LINK_LENGTH {
        return Err(ServiceError::Validation("Image link is too long".to_string()));
    }

    if !url.starts_with("https://") || !url.validate_url() {
        return Err(ServiceError::Validation(
            "Image link must be a valid HTTPS URL".to_string(),
        ));
    }

    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), ServiceError> {
    if username.is_empty() {
        return Err(ServiceError::Validation("Username cannot be empty".to_string()));
    }

    if username.len() < 3 {
        return Err(ServiceError::Validation(
            "Username must be at least 3 characters long".to_string(),
        ));
    }

    if username.len() > 30 {
        return Err(ServiceError::Validation(
            "Username must be at most 30 characters long".to_string(),
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ServiceError::Validation(
            "Username can only contain letters, numbers, underscores, and hyphens".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_daily_goal_target(target: i32) -> Result<(), ServiceError> {
    if !(1..=MAX_DAILY_GOAL_TARGET).contains(&target) {
        return Err(ServiceError::Validation(format!(
            "Daily goal target must be between 1 and {MAX_DAILY_GOAL_TARGET}"
        )));
    }
    Ok(())
}

pub fn validate_progress_increment(increment: i32) -> Result<(), ServiceError> {
    if increment < 1 {
        return Err(ServiceError::Validation(
            "Progress increment must be positive".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_due_cards_limit(limit: i64) -> Result<(), ServiceError> {
    if !(1..=MAX_DUE_CARDS_LIMIT).contains(&limit) {
        return Err(ServiceError::Validation(format!(
            "Limit must be between 1 and {MAX_DUE_CARDS_LIMIT}"
        )));
    }
    Ok(())
}
