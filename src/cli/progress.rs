use ansi_term::Colour;
use anyhow::Result;

use crate::{
    core::tracker::HabitTracker,
    storage::{
        completion_store::CompletionStore, entities::UserEntity, habit_repository::HabitRepository,
    },
};

pub async fn show<R: HabitRepository, C: CompletionStore>(
    tracker: &HabitTracker<R, C>,
    user: &UserEntity,
) -> Result<()> {
    let today = tracker.today_progress(&user.id).await?;
    let week = tracker.weekly_progress(&user.id).await?;
    println!("Today:     {}", colored_percent(today));
    println!("This week: {}", colored_percent(week));
    Ok(())
}

fn colored_percent(value: u8) -> String {
    let colour = if value >= 80 {
        Colour::Green
    } else if value >= 40 {
        Colour::Yellow
    } else {
        Colour::Red
    };
    colour.paint(format!("{value}%")).to_string()
}
