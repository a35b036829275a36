use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::quiz::Question;

/// Options per keyboard row.
const ROW_WIDTH: usize = 2;

/// Lays the variants out as a 2x2 grid: first two on top, last two below.
/// The keyboard shrinks to fit its labels and hides after one tap.
pub(crate) fn question_keyboard(question: &Question) -> KeyboardMarkup {
    let keyboard: Vec<Vec<KeyboardButton>> = question
        .variants()
        .chunks(ROW_WIDTH)
        .map(|row| row.iter().map(KeyboardButton::new).collect())
        .collect();

    KeyboardMarkup::new(keyboard)
        .resize_keyboard()
        .one_time_keyboard()
}
