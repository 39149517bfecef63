//! Input validation for all player routes
use overfast_client::{GameMode, Platform};
use thiserror::Error;

const SEARCH_TERM_MIN: usize = 3;
const SEARCH_TERM_MAX: usize = 50;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("BattleTag parameter is required")]
    BattleTagMissing,

    #[error("Invalid BattleTag format (should be: Name-1234)")]
    BattleTagInvalid,

    #[error("Platform must be either \"pc\" or \"console\"")]
    PlatformInvalid,

    #[error("Gamemode must be either \"competitive\" or \"quickplay\"")]
    GameModeInvalid,

    #[error("Name or BattleTag parameter is required")]
    SearchTermMissing,

    #[error("Search term must be at least 3 characters long")]
    SearchTermTooShort,

    #[error("Search term must be at most 50 characters long")]
    SearchTermTooLong,

    #[error("Search term may only contain letters, digits, hyphens and underscores")]
    SearchTermInvalidChars,
}

impl ValidationError {
    /// Message sent back in the error envelope.
    pub fn client_message(&self) -> String {
        match self {
            ValidationError::SearchTermTooShort
            | ValidationError::SearchTermTooLong
            | ValidationError::SearchTermInvalidChars => format!("Validation error: {self}"),
            ValidationError::SearchTermMissing
            | ValidationError::BattleTagMissing
            | ValidationError::BattleTagInvalid
            | ValidationError::PlatformInvalid
            | ValidationError::GameModeInvalid => self.to_string(),
        }
    }
}

/// Validates a BattleTag in its URL form
///
/// Rules:
/// - 3 to 12 ASCII letters or digits
/// - a single hyphen
/// - 4 or 5 digits
pub fn validate_battletag(battletag: &str) -> Result<&str, ValidationError> {
    if battletag.is_empty() {
        return Err(ValidationError::BattleTagMissing);
    }

    let (name, discriminator) = battletag
        .split_once('-')
        .ok_or(ValidationError::BattleTagInvalid)?;

    let name_ok =
        (3..=12).contains(&name.len()) && name.bytes().all(|b| b.is_ascii_alphanumeric());
    let discriminator_ok = (4..=5).contains(&discriminator.len())
        && discriminator.bytes().all(|b| b.is_ascii_digit());

    if !name_ok || !discriminator_ok {
        return Err(ValidationError::BattleTagInvalid);
    }

    Ok(battletag)
}

/// Validates the `platform` query parameter, defaulting to PC.
pub fn validate_platform(platform: Option<&str>) -> Result<Platform, ValidationError> {
    match platform {
        None | Some("") => Ok(Platform::default()),
        Some("pc") => Ok(Platform::Pc),
        Some("console") => Ok(Platform::Console),
        Some(_) => Err(ValidationError::PlatformInvalid),
    }
}

/// Validates the `gamemode` query parameter. Absent means no filter.
pub fn validate_gamemode(gamemode: Option<&str>) -> Result<Option<GameMode>, ValidationError> {
    match gamemode {
        None | Some("") => Ok(None),
        Some("competitive") => Ok(Some(GameMode::Competitive)),
        Some("quickplay") => Ok(Some(GameMode::Quickplay)),
        Some(_) => Err(ValidationError::GameModeInvalid),
    }
}

/// Validates a free-text player search term
///
/// Rules:
/// - Required
/// - 3 to 50 characters
/// - Only letters, digits, hyphens and underscores
pub fn validate_search_term(term: Option<&str>) -> Result<&str, ValidationError> {
    let term = match term {
        Some(term) if !term.is_empty() => term,
        _ => return Err(ValidationError::SearchTermMissing),
    };

    let len = term.chars().count();
    if len < SEARCH_TERM_MIN {
        return Err(ValidationError::SearchTermTooShort);
    }

    if len > SEARCH_TERM_MAX {
        return Err(ValidationError::SearchTermTooLong);
    }

    if !term
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::SearchTermInvalidChars);
    }

    Ok(term)
}
