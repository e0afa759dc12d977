//! Turn classification predicates
//!
//! Pure word-list heuristics, kept out of the orchestration flow so the
//! thresholds and lists can change without touching control logic.

const GREETINGS: [&str; 9] = [
    "hello",
    "hi",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "howdy",
    "what's up",
    "how are you",
];

/// Substrings that mean the utterance carries booking info even when it
/// opens with a greeting ("Hi, my name is...").
const INFO_INDICATORS: [&str; 9] = [
    "i'm ",
    "my name",
    "name is",
    "registration",
    "miles",
    "warranty",
    "oil",
    "brake",
    "service",
];

const QUESTION_STARTERS: [&str; 8] = [
    "what ", "when ", "where ", "how ", "why ", "can you ", "could you ", "will you ",
];

const MAX_GREETING_WORDS: usize = 8;
const MAX_PARSER_WORDS: usize = 30;

/// True for a pure short greeting with no booking info in it. These get
/// an instant canned reply with no model call at all.
pub fn is_greeting(utterance: &str) -> bool {
    let msg = utterance.trim().to_lowercase();
    if msg.split_whitespace().count() >= MAX_GREETING_WORDS {
        return false;
    }
    if !GREETINGS.iter().any(|g| msg.starts_with(g)) {
        return false;
    }
    !INFO_INDICATORS.iter().any(|ind| msg.contains(ind))
}

/// Should this turn attempt structured extraction?
///
/// The parser handles short factual statements well, including answers
/// with a questioning tone ("It's Murtaza?"). It is skipped for real
/// questions, which start with an interrogative, and for long rambling
/// turns that need conversational handling.
pub fn should_use_parser(utterance: &str) -> bool {
    let msg = utterance.trim().to_lowercase();
    if is_greeting(&msg) {
        return false;
    }
    if QUESTION_STARTERS.iter().any(|q| msg.starts_with(q)) {
        return false;
    }
    msg.split_whitespace().count() <= MAX_PARSER_WORDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_greetings_match() {
        assert!(is_greeting("Hi there"));
        assert!(is_greeting("hello"));
        assert!(is_greeting("Good morning!"));
    }

    #[test]
    fn greeting_with_booking_info_does_not_match() {
        assert!(!is_greeting("Hi, my name is Alex"));
        assert!(!is_greeting("hello, it needs an oil change"));
    }

    #[test]
    fn long_openers_are_not_greetings() {
        assert!(!is_greeting(
            "hey so I was wondering whether you could possibly fit me in"
        ));
    }

    #[test]
    fn parser_takes_short_factual_statements() {
        assert!(should_use_parser("AB12 CDE"));
        assert!(should_use_parser("It's Murtaza?"));
        assert!(should_use_parser("no, the warranty expired"));
    }

    #[test]
    fn parser_skips_real_questions() {
        assert!(!should_use_parser("What are your opening hours?"));
        assert!(!should_use_parser("Could you tell me the price first"));
    }

    #[test]
    fn parser_skips_greetings_and_long_turns() {
        assert!(!should_use_parser("Hi there"));
        let rambling = "well ".repeat(31);
        assert!(!should_use_parser(&rambling));
    }
}
