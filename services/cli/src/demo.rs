use crate::infra::in_memory_service;
use crate::report::{render_analytics, render_record, store_conversations};
use clap::Args;
use convo_score::config::AppConfig;
use convo_score::conversations::{
    AnalysisFilter, ConversationRepository, MessageInput, NewConversation,
};
use convo_score::error::AppError;
use convo_score::scoring::Sender;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the weighted contribution of every scoring dimension
    #[arg(long)]
    pub(crate) breakdown: bool,
    /// Only list conversations flagged for human escalation after scoring
    #[arg(long)]
    pub(crate) escalations_only: bool,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        breakdown,
        escalations_only,
    } = args;

    let service = in_memory_service(&config.scoring)?;
    let stored = store_conversations(&service, sample_conversations())?;
    println!("Conversation quality demo ({} sample conversations)", stored);

    for conversation in service.conversations().unanalyzed(usize::MAX)? {
        service.analyze(&conversation.id)?;
    }

    let filter = AnalysisFilter {
        escalation_needed: escalations_only.then_some(true),
        ..AnalysisFilter::default()
    };
    for record in service.analyses(&filter)? {
        render_record(&record, breakdown.then_some(&config.scoring));
    }

    render_analytics(service.analytics()?.as_ref());
    Ok(())
}

fn conversation(title: &str, turns: &[(Sender, &str)]) -> NewConversation {
    NewConversation {
        title: title.to_string(),
        messages: turns
            .iter()
            .map(|(sender, text)| MessageInput {
                sender: *sender,
                text: text.to_string(),
            })
            .collect(),
    }
}

pub(crate) fn sample_conversations() -> Vec<NewConversation> {
    vec![
        conversation(
            "Password reset",
            &[
                (Sender::User, "Hi, I can't log into my account"),
                (
                    Sender::Ai,
                    "Sorry to hear that. Please reset your password from the login page, for example by using the 'Forgot password' link.",
                ),
                (Sender::User, "That worked, I'm in now"),
                (
                    Sender::Ai,
                    "Great! Let me know if there is anything else I can help with.",
                ),
                (Sender::User, "thanks, that's perfect"),
            ],
        ),
        conversation(
            "Late order",
            &[
                (Sender::User, "My order is late"),
                (
                    Sender::Ai,
                    "I understand your frustration, here's an example of what happened",
                ),
            ],
        ),
        conversation(
            "Refund dispute",
            &[
                (Sender::User, "I was charged twice and this is terrible"),
                (
                    Sender::Ai,
                    "I'm not sure why that happened. The refund status is not available right now.",
                ),
                (Sender::User, "This is awful, I want my money back"),
                (
                    Sender::Ai,
                    "I don't know when the refund will arrive, I am unable to check payments.",
                ),
                (Sender::User, "Useless. Terrible service."),
            ],
        ),
        conversation("Empty draft", &[]),
    ]
}
