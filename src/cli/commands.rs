use crate::app::{AppContext, NewsDailyError, Result, ValidationError};
use crate::cli::PreferencesArgs;
use crate::domain::channel::SLACK_WEBHOOK_GUIDE_URL;
use crate::domain::{PreferenceSelection, SubmissionStatus, TopicCatalog};
use crate::workflow::{HomePage, PreferencesPage, SubscribePage};

pub async fn show_stats(ctx: &AppContext) -> Result<()> {
    let mut page = HomePage::new();
    let stats = page.load(&ctx.client).await;

    println!("Active subscribers: {}", stats.total_subscribers);
    println!("Topic categories:   {}", stats.total_topics);
    println!("Daily articles:     {}", stats.daily_articles);

    if stats.recent_articles.is_empty() {
        return Ok(());
    }

    println!("\nLatest AI news:");
    for article in &stats.recent_articles {
        let date = article
            .published()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "          ".to_string());
        println!(
            "  {} [{}] {}\n    {} - {}",
            date,
            article.category,
            article.display_title(),
            article.display_source(),
            article.url
        );
    }

    Ok(())
}

pub fn list_topics() {
    for topic in TopicCatalog::all() {
        println!(
            "{:>2}. {} {}\n    {}",
            topic.id, topic.icon, topic.name, topic.description
        );
    }
}

pub async fn subscribe(ctx: &AppContext, email: &str) -> Result<()> {
    let mut page = SubscribePage::new();
    page.set_email(email);
    report(page.submit(&ctx.client).await)?;

    if let Some(redirect) = page.redirect() {
        println!("Next: newsdaily preferences {}  ({})", page.email().trim(), redirect);
    }
    Ok(())
}

pub async fn update_preferences(ctx: &AppContext, args: &PreferencesArgs) -> Result<()> {
    let mut page = PreferencesPage::new(ctx.config.defaults.clone());
    page.set_email(args.email.as_str());

    let lookup = if args.no_prefill { None } else { Some(&ctx.client) };
    page.continue_with_email(lookup).await?;

    page.edit(|form| apply_args(form, args)).unwrap_or(Ok(()))?;

    if let Some(form) = page.form() {
        print_summary(form);
    }

    report(page.submit(&ctx.client).await)?;

    let Some(webhook) = args.slack_webhook.as_deref() else {
        return Ok(());
    };
    let Some(setup) = page.channel_setup() else {
        return Ok(());
    };

    setup.set_channel_name(args.slack_channel.clone().unwrap_or_default());
    setup.set_webhook_url(webhook);

    println!("Testing & adding Slack...");
    setup.submit(&ctx.client).await;
    report(setup.status())
}

pub fn slack_guide(open_browser: bool) -> Result<()> {
    println!("Quick Slack setup:");
    println!("  1. Create an incoming webhook in your workspace:");
    println!("     {}", SLACK_WEBHOOK_GUIDE_URL);
    println!("     Choose the channel where you want AI news (e.g. #ai-news).");
    println!("  2. Add it to your account:");
    println!("     newsdaily preferences <email> --topic 1 --slack-webhook <url> [--slack-channel <name>]");

    if open_browser {
        open::that(SLACK_WEBHOOK_GUIDE_URL)?;
    }
    Ok(())
}

/// Topics given on the command line replace the saved selection.
fn apply_args(
    form: &mut PreferenceSelection,
    args: &PreferencesArgs,
) -> std::result::Result<(), ValidationError> {
    if !args.topics.is_empty() {
        for id in form.selected_topic_ids() {
            form.set_topic_selected(id, false);
        }
        for &(id, priority) in &args.topics {
            if !TopicCatalog::contains(id) {
                return Err(ValidationError::UnknownTopic(id));
            }
            form.set_topic_selected(id, true);
            form.set_priority(id, priority)?;
        }
    }
    if let Some(time) = &args.time {
        form.set_preferred_time(time)?;
    }
    if let Some(tz) = &args.timezone {
        form.set_timezone(tz)?;
    }
    if let Some(frequency) = args.frequency {
        form.set_frequency(frequency);
    }
    if let Some(max) = args.max_articles {
        form.set_max_articles(max)?;
    }
    Ok(())
}

fn print_summary(form: &PreferenceSelection) {
    println!("Account: {}", form.email());
    for (id, priority) in form.priorities() {
        if let Some(topic) = TopicCatalog::get(*id) {
            println!("  {} {} ({})", topic.icon, topic.name, priority.label());
        }
    }
    println!(
        "  {} at {} {}, up to {} articles",
        form.frequency(),
        form.preferred_time().format("%H:%M"),
        form.timezone(),
        form.max_articles()
    );
}

fn report(status: &SubmissionStatus) -> Result<()> {
    match status {
        SubmissionStatus::Success(message) => {
            println!("{}", message);
            Ok(())
        }
        SubmissionStatus::Error(message) => Err(NewsDailyError::Other(message.clone())),
        SubmissionStatus::Idle => Ok(()),
    }
}
