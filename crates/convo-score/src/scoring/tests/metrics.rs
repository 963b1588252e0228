use super::common::assert_close;
use crate::scoring::metrics::{accuracy, clarity, completeness, empathy, relevance};

#[test]
fn clarity_of_empty_text_is_zero() {
    assert_eq!(clarity(""), 0.0);
    assert_eq!(clarity("   \n\t"), 0.0);
}

#[test]
fn clarity_without_words_is_zero() {
    assert_eq!(clarity("..."), 0.0);
    assert_eq!(clarity(". . ."), 0.0);
}

#[test]
fn clarity_rewards_short_sentences() {
    // Two sentences of 3 and 5 words: 100 - 2*4 + 10, capped at 100.
    assert_close(clarity("Your order shipped. It arrives on Tuesday morning."), 100.0);

    let rambling = "word ".repeat(40);
    // One sentence of 40 words: 100 - 80 + 10.
    assert_close(clarity(&rambling), 30.0);

    let endless = "word ".repeat(80);
    assert_close(clarity(&endless), 10.0);
}

#[test]
fn relevance_counts_shared_words_beyond_stop_words() {
    // user tokens {where, is, my, package}; shared non-stop tokens {my, package}.
    let score = relevance("where is my package", "my package is on the truck", 20.0);
    assert_close(score, 70.0);
}

#[test]
fn relevance_ignores_stop_word_overlap() {
    let score = relevance("is it the one", "it is the best", 20.0);
    assert_close(score, 20.0);
}

#[test]
fn relevance_with_empty_user_text_is_bonus_only() {
    assert_close(relevance("", "anything at all", 20.0), 20.0);
    assert_close(relevance("   ", "anything at all", 35.0), 35.0);
}

#[test]
fn relevance_caps_at_one_hundred() {
    assert_close(relevance("refund status", "refund status", 20.0), 100.0);
}

#[test]
fn accuracy_is_non_increasing_in_hedges() {
    let hedges = [
        "i think",
        "i believe",
        "maybe",
        "possibly",
        "i'm not sure",
        "i don't know",
        "i'm unsure",
        "approximately",
        "roughly",
    ];

    let mut previous = accuracy("The parcel left the depot today.");
    assert_close(previous, 100.0);

    for count in 1..=hedges.len() {
        let text = hedges[..count].join(", ");
        let score = accuracy(&text);
        assert!(score <= previous, "{count} hedges raised the score");
        if count >= 7 {
            assert_eq!(score, 0.0);
        }
        previous = score;
    }
}

#[test]
fn accuracy_matches_case_insensitively() {
    assert_close(accuracy("I THINK it shipped, MAYBE yesterday"), 70.0);
}

#[test]
fn completeness_combines_length_detail_and_closure() {
    // 9 words, "example" present, no closure marker.
    assert_close(
        completeness("I understand your frustration, here's an example of this"),
        60.0,
    );
    // 10 words moves into the middle length bucket.
    assert_close(
        completeness("I understand your frustration, here's an example of what happened"),
        90.0,
    );
    assert_close(completeness(""), 45.0);
}

#[test]
fn completeness_caps_at_one_hundred() {
    let long_reply = format!(
        "{} For example, specifically the tracking page. Let me know if I can help.",
        "detail ".repeat(30)
    );
    assert_close(completeness(&long_reply), 100.0);
}

#[test]
fn completeness_is_stable_across_calls() {
    let text = "Here is a specific example, such as the settings page. Thanks!";
    let first = completeness(text);
    for _ in 0..5 {
        assert_eq!(completeness(text), first);
    }
}

#[test]
fn empathy_counts_each_phrase_once() {
    assert_close(
        empathy("I understand your frustration, here's an example of what happened"),
        30.0,
    );
    assert_close(empathy("sorry, so sorry, really sorry"), 15.0);
    assert_close(empathy("The tracking number is 1Z999."), 0.0);
}

#[test]
fn empathy_caps_at_one_hundred() {
    let text = "I understand, I appreciate your patience, thank you, sorry, I apologize. \
                We help and support you; your concern and how you feel is important \
                and does matter. I get it, I understand your point.";
    assert_close(empathy(text), 100.0);
}
