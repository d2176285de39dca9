//! The FinAnalyse conversational assistant

use crate::error::Result;
use crate::gemini::GeminiClient;
use crate::messages::ChatTurn;
use crate::session::SessionStore;
use std::sync::Arc;

/// Persona priming, replayed at the head of every conversation.
const PERSONA_PROMPT: &str = "You are FinAnalyse AI, a conversational assistant specialised in \
finance for beginners. Be friendly and educational, and explain concepts simply. Never give \
direct investment advice, but help users understand the data.";

const PERSONA_GREETING: &str =
    "Hello! I am FinAnalyse AI. How can I help you understand finance better today?";

/// Finance tutor on top of Gemini, with per-session memory.
pub struct FinanceAssistant {
    gemini: GeminiClient,
    sessions: Arc<dyn SessionStore>,
}

impl FinanceAssistant {
    pub fn new(gemini: GeminiClient, sessions: Arc<dyn SessionStore>) -> Self {
        Self { gemini, sessions }
    }

    /// Multi-turn chat: replay the persona and the session's history,
    /// ask the model, and record the exchange.
    pub async fn chat(&self, session_id: &str, message: &str) -> Result<String> {
        let swept = self.sessions.evict_expired();
        if swept > 0 {
            tracing::debug!(swept, "dropped expired chat sessions");
        }

        let history = self.sessions.history(session_id).unwrap_or_default();
        let turns = conversation(&history, message);

        let reply = self.gemini.generate(&turns).await?;
        self.sessions.record_exchange(session_id, message, &reply);
        Ok(reply)
    }

    /// One-shot neutral analysis comment for a company snapshot.
    pub async fn analysis_comment(&self, figures: &CompanyFigures) -> Result<String> {
        self.gemini
            .generate(&[ChatTurn::user(figures.prompt())])
            .await
    }
}

/// Assemble the full turn list sent to the model: persona priming,
/// recorded history, then the new user message.
fn conversation(history: &[ChatTurn], message: &str) -> Vec<ChatTurn> {
    let mut turns = Vec::with_capacity(history.len() + 3);
    turns.push(ChatTurn::user(PERSONA_PROMPT));
    turns.push(ChatTurn::model(PERSONA_GREETING));
    turns.extend_from_slice(history);
    turns.push(ChatTurn::user(message));
    turns
}

/// Key figures fed to the analysis prompt. Missing values render as
/// zero, which the prompt's neutral tone tolerates.
#[derive(Debug, Clone, Default)]
pub struct CompanyFigures {
    pub name: String,
    pub price: Option<f64>,
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub roe: Option<f64>,
    pub net_margin: Option<f64>,
}

impl CompanyFigures {
    fn prompt(&self) -> String {
        format!(
            "As a financial analyst writing for beginner investors, write a short analysis \
             (3-4 sentences) of {name}. Keep a neutral, informative tone and use simple \
             language. Key figures:\n\
             - Share price: ${price:.2}\n\
             - Annual revenue: {revenue:.1} billion $\n\
             - Annual net income: {net_income:.1} billion $\n\
             - Price/earnings ratio: {pe:.1}\n\
             - Return on equity: {roe:.1}%\n\
             - Net margin: {margin:.1}%\n\
             Mention one strength and one point of caution, then close with a neutral \
             sentence. Do not give investment advice.",
            name = self.name,
            price = self.price.unwrap_or(0.0),
            revenue = self.revenue.unwrap_or(0.0) / 1e9,
            net_income = self.net_income.unwrap_or(0.0) / 1e9,
            pe = self.pe_ratio.unwrap_or(0.0),
            roe = self.roe.unwrap_or(0.0) * 100.0,
            margin = self.net_margin.unwrap_or(0.0) * 100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ChatRole;

    #[test]
    fn test_conversation_starts_with_persona() {
        let turns = conversation(&[], "What is diversification?");

        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].role, ChatRole::User);
        assert!(turns[0].text.contains("FinAnalyse AI"));
        assert_eq!(turns[1].role, ChatRole::Model);
        assert_eq!(turns[2].text, "What is diversification?");
    }

    #[test]
    fn test_conversation_replays_history_in_order() {
        let history = vec![
            ChatTurn::user("What is a stock?"),
            ChatTurn::model("A share of a company."),
        ];
        let turns = conversation(&history, "And a bond?");

        assert_eq!(turns.len(), 5);
        assert_eq!(turns[2].text, "What is a stock?");
        assert_eq!(turns[3].text, "A share of a company.");
        assert_eq!(turns[4].text, "And a bond?");
    }

    #[test]
    fn test_analysis_prompt_mentions_figures() {
        let figures = CompanyFigures {
            name: "Apple Inc.".to_string(),
            price: Some(227.52),
            revenue: Some(391_035_000_000.0),
            net_income: Some(93_736_000_000.0),
            pe_ratio: Some(34.2),
            roe: Some(1.56),
            net_margin: Some(0.24),
        };
        let prompt = figures.prompt();

        assert!(prompt.contains("Apple Inc."));
        assert!(prompt.contains("$227.52"));
        assert!(prompt.contains("391.0 billion"));
        assert!(prompt.contains("156.0%"));
        assert!(prompt.contains("Do not give investment advice"));
    }

    #[test]
    fn test_analysis_prompt_tolerates_missing_figures() {
        let figures = CompanyFigures {
            name: "Example Corp".to_string(),
            ..Default::default()
        };
        let prompt = figures.prompt();
        assert!(prompt.contains("$0.00"));
    }
}
