pub const ERROR_MESSAGE_CONNECTION: &str =
    "Error connecting to the service. Please check the connection strings and try again.";
pub const ERROR_MESSAGE_VOTE_GAME: &str = "Error casting your vote. Refresh the page and try again.";
pub const ERROR_MESSAGE_ADD_NEW_TITLE: &str =
    "Error adding new title. Refresh the page and try again.";
pub const ERROR_MESSAGE_MARK_OWNED: &str =
    "Error marking game as owned. Please refresh the page and try again.";
pub const ERROR_MESSAGE_FETCH_GAMES: &str = "Error fetching the list of games. Please try again.";
pub const ERROR_MESSAGE_CHOOSE_GAME: &str =
    "Error selecting a game. Choose a game from the drop-down and try again.";
pub const ERROR_MESSAGE_EMPTY_TITLE: &str = "Enter the title of the game and try again.";
pub const MESSAGE_VOTED: &str = "Voted successfully!";

pub fn title_added(title: &str) -> String {
    format!("Game [{}] successfully added!", escape_html(title))
}

pub fn title_exists(title: &str) -> String {
    format!("Game [{}] is already in the list.", escape_html(title))
}

pub fn marked_owned(title: Option<&str>) -> String {
    match title {
        Some(title) => format!(
            "Game [{}] successfully marked as owned!",
            escape_html(title)
        ),
        None => String::from("Game successfully marked as owned!"),
    }
}

/// Escapes text so it can be redisplayed inside HTML.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_safe(text).into_owned()
}
