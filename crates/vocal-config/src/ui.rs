use serde::{Deserialize, Serialize};

fn default_menu_offset_y() -> i32 {
    40
}

fn default_min_word_len() -> usize {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How far above the pointer the floating menu sits
    #[serde(default = "default_menu_offset_y")]
    pub menu_offset_y: i32,
    /// Shortest selection that opens the menu; values below 2 act as 2
    #[serde(default = "default_min_word_len")]
    pub min_word_len: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            menu_offset_y: default_menu_offset_y(),
            min_word_len: default_min_word_len(),
        }
    }
}
