use crate::app::{AppContext, Result};
use crate::domain::Topic;
use crate::query::{DateWindow, Query, SortMode};
use crate::session::{resolve_category, Session};

pub async fn list_topics(
    ctx: &AppContext,
    window: DateWindow,
    category: Option<String>,
    search: String,
    sort: SortMode,
) -> Result<()> {
    let session = Session::load(ctx).await?;
    let view = session.query(&Query {
        window,
        category,
        search,
        sort,
    });

    if view.topics.is_empty() {
        println!("No topics match");
        return Ok(());
    }

    for topic in &view.topics {
        println!("{}", format_row(topic));
    }
    println!(
        "{} of {} topics ({})",
        view.topics.len(),
        session.topics().len(),
        session.source_label()
    );
    Ok(())
}

pub async fn list_categories(ctx: &AppContext) -> Result<()> {
    let session = Session::load(ctx).await?;
    let categories = session.query(&Query::default()).categories;

    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }
    for category in categories {
        println!("{}", category);
    }
    Ok(())
}

pub async fn pick_topic(ctx: &AppContext) -> Result<()> {
    let session = Session::load(ctx).await?;
    match session.pick() {
        Some(topic) => {
            if topic.category.is_empty() {
                println!("Picked: {}  ({})", topic.title, topic.id);
            } else {
                println!("Picked: {} [{}]  ({})", topic.title, topic.category, topic.id);
            }
        }
        None => println!("No topics available."),
    }
    Ok(())
}

pub async fn toggle_done(ctx: &AppContext, id: &str) -> Result<()> {
    let mut session = Session::load(ctx).await?;
    let topic = session.toggle_done(id)?;
    if topic.done {
        println!("Marked done: {}", topic.title);
    } else {
        println!("Marked not done: {}", topic.title);
    }
    Ok(())
}

pub async fn add_topic(
    ctx: &AppContext,
    title: &str,
    category: Option<String>,
    new_category: Option<String>,
) -> Result<()> {
    let mut session = Session::load(ctx).await?;
    let category = resolve_category(category.as_deref(), new_category.as_deref());
    let topic = session.add_topic(title, &category)?;
    println!("Added: {} [{}]  ({})", topic.title, topic.category, topic.id);
    Ok(())
}

fn format_row(topic: &Topic) -> String {
    let marker = if topic.done { "✓" } else { "·" };
    let stamp = topic
        .completed_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "          ".to_string());
    let tag = if topic.category.is_empty() {
        String::new()
    } else {
        format!(" [{}]", topic.category)
    };
    format!("{} {} {}  {}{}", marker, stamp, topic.id, topic.title, tag)
}
