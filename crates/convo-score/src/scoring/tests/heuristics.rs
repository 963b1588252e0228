use super::common::*;
use crate::scoring::heuristics::{
    average_response_time, escalation_needed, fallback_count, resolution_detected,
};
use crate::scoring::{Sender, SentimentLabel};

#[test]
fn fallback_counts_each_phrase_within_a_message() {
    let turns = messages(&[
        (Sender::User, "Can you change my billing date?"),
        (
            Sender::Ai,
            "I'm not sure, that option is not available to me.",
        ),
        (Sender::User, "Why not? I don't know what else to do"),
        (Sender::Ai, "I am unable to change it, sorry."),
    ]);

    assert_eq!(fallback_count(&turns), 3);
}

#[test]
fn fallback_ignores_user_messages() {
    let turns = messages(&[
        (Sender::User, "I don't know my order number, I'm not sure where it is"),
        (Sender::Ai, "No problem, I can look it up by email."),
    ]);

    assert_eq!(fallback_count(&turns), 0);
}

#[test]
fn resolution_requires_a_user_message() {
    let config = scoring_config();
    assert!(!resolution_detected(&[], &config));

    let ai_only = messages(&[(Sender::Ai, "Hello! How can I help?")]);
    assert!(!resolution_detected(&ai_only, &config));
}

#[test]
fn resolution_detects_closing_keywords() {
    let config = scoring_config();
    let transcript = resolved_transcript();
    assert!(resolution_detected(transcript.messages(), &config));

    let short = messages(&[
        (Sender::User, "Where is my refund?"),
        (Sender::Ai, "It was issued this morning."),
        (Sender::User, "Perfect"),
    ]);
    assert!(resolution_detected(&short, &config));
}

#[test]
fn brief_closing_only_resolves_longer_conversations() {
    let config = scoring_config();
    let three = messages(&[
        (Sender::User, "Where is my refund?"),
        (Sender::Ai, "It was issued this morning."),
        (Sender::User, "When will it land"),
    ]);
    assert!(!resolution_detected(&three, &config));

    let four = messages(&[
        (Sender::User, "Where is my refund?"),
        (Sender::Ai, "It was issued this morning."),
        (Sender::User, "When will it land"),
        (Sender::Ai, "Within five business days."),
    ]);
    assert!(resolution_detected(&four, &config));
}

#[test]
fn long_final_user_message_without_keyword_is_unresolved() {
    let config = scoring_config();
    let turns = messages(&[
        (Sender::User, "Hi"),
        (Sender::Ai, "Hello, what can I do for you?"),
        (Sender::User, "My parcel"),
        (Sender::Ai, "Could you share the tracking number?"),
        (
            Sender::User,
            "I have been waiting for three weeks and still have no tracking information at all",
        ),
    ]);

    assert!(!resolution_detected(&turns, &config));
}

#[test]
fn escalation_fires_after_five_user_turns_regardless_of_sentiment() {
    let config = scoring_config();
    let turns = messages(&[
        (Sender::User, "one"),
        (Sender::User, "two"),
        (Sender::User, "three"),
        (Sender::User, "four"),
        (Sender::User, "five"),
        (Sender::User, "six"),
    ]);

    for label in [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ] {
        assert!(escalation_needed(&turns, label, &config));
    }
}

#[test]
fn escalation_needs_negativity_and_repeated_fallbacks() {
    let config = scoring_config();
    let turns = messages(&[
        (Sender::User, "This is useless"),
        (Sender::Ai, "I'm not sure. That report is not available."),
    ]);

    assert!(escalation_needed(&turns, SentimentLabel::Negative, &config));
    assert!(!escalation_needed(&turns, SentimentLabel::Neutral, &config));

    let single = messages(&[
        (Sender::User, "This is useless"),
        (Sender::Ai, "I'm not sure what happened there."),
    ]);
    assert!(!escalation_needed(&single, SentimentLabel::Negative, &config));
}

#[test]
fn response_time_skips_an_opening_ai_turn() {
    let config = scoring_config();
    let greeting_only = messages(&[(Sender::Ai, "Welcome! How can I help?")]);
    assert_eq!(average_response_time(&greeting_only, &config), 0.0);

    let turns = messages(&[
        (Sender::Ai, "Welcome! How can I help?"),
        (Sender::User, "Track my order"),
        (Sender::Ai, "Sure, what's the number?"),
    ]);
    assert_close(average_response_time(&turns, &config), 3.0);

    let users_only = messages(&[(Sender::User, "hello?")]);
    assert_eq!(average_response_time(&users_only, &config), 0.0);
}
