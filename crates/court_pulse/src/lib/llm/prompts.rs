use std::fmt;

/// Canned fantasy-basketball questions offered alongside free-form input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    WaiverWire,
    BuyLowSellHigh,
    InjuryUpdates,
    DropCandidates,
    Strategy,
    PlayersByPosition,
}

impl PromptTemplate {
    pub const ALL: [PromptTemplate; 6] = [
        PromptTemplate::WaiverWire,
        PromptTemplate::BuyLowSellHigh,
        PromptTemplate::InjuryUpdates,
        PromptTemplate::DropCandidates,
        PromptTemplate::Strategy,
        PromptTemplate::PlayersByPosition,
    ];

    pub fn text(&self) -> &'static str {
        match self {
            PromptTemplate::WaiverWire => {
                "Which players mentioned in the video are good waiver wire pickups?"
            }
            PromptTemplate::BuyLowSellHigh => {
                "Based on this video, who are some buy-low or sell-high candidates?"
            }
            PromptTemplate::InjuryUpdates => {
                "What are the injury updates discussed in the video, and how do they impact player value?"
            }
            PromptTemplate::DropCandidates => {
                "Does this video suggest any players I should drop from my roster?"
            }
            PromptTemplate::Strategy => {
                "Summarize the overall strategy discussed in the video (e.g., streaming, punting categories)."
            }
            PromptTemplate::PlayersByPosition => {
                "Generate a list of players mentioned in this video, categorized by position and projected value."
            }
        }
    }

    /// 1-based position in [`PromptTemplate::ALL`]
    pub fn number(&self) -> usize {
        Self::ALL
            .iter()
            .position(|t| t == self)
            .map_or(0, |idx| idx + 1)
    }

    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Picks the question to send: a selected template wins over typed text,
/// and blank typed text counts as no question at all.
pub fn resolve_question(selected: Option<PromptTemplate>, typed: &str) -> Option<String> {
    match selected {
        Some(template) => Some(template.text().to_string()),
        None if typed.trim().is_empty() => None,
        None => Some(typed.trim().to_string()),
    }
}
