use mealcal::{HttpApi, Planner};
use mealcal_mealplan::{Calendar, CalendarDay, MealAssignment, MealType, today as today_of};
use mealcal_shared::date;
use strum::VariantArray;

pub async fn plans(planner: &Planner<HttpApi>) -> anyhow::Result<()> {
    super::require_login(planner)?;

    let calendar = planner.refresh().await?;
    print_calendar(&calendar)
}

pub async fn today(planner: &Planner<HttpApi>) -> anyhow::Result<()> {
    super::require_login(planner)?;

    let calendar = planner.refresh().await?;

    match today_of(&calendar.days) {
        Some(day) => print_day(day)?,
        None => println!("Nothing planned for today. Run `mealcal generate` to plan ahead."),
    }

    Ok(())
}

pub async fn generate(planner: &Planner<HttpApi>, days: usize) -> anyhow::Result<()> {
    super::require_login(planner)?;

    let calendar = planner.generate(days).await?;
    print_calendar(&calendar)
}

pub async fn fill(planner: &Planner<HttpApi>) -> anyhow::Result<()> {
    super::require_login(planner)?;

    let calendar = planner.generate_ahead().await?;
    print_calendar(&calendar)
}

pub async fn complete(planner: &Planner<HttpApi>, value: &str) -> anyhow::Result<()> {
    super::require_login(planner)?;

    let calendar = planner.complete(value).await?;
    println!("Marked {} as complete", date::format_for_display(value)?);
    println!("{}", calendar.capacity.summary());

    Ok(())
}

pub async fn meal(planner: &Planner<HttpApi>, value: &str, meal_type: MealType) -> anyhow::Result<()> {
    super::require_login(planner)?;

    let Some(meal) = planner.meal(value, meal_type).await? else {
        anyhow::bail!(
            "No {} planned for {}",
            meal_type.as_ref().to_lowercase(),
            date::format_for_display(value)?
        );
    };

    print_meal(meal_type, value, &meal)
}

fn print_calendar(calendar: &Calendar) -> anyhow::Result<()> {
    if calendar.is_empty() {
        println!("No meals planned yet. Run `mealcal generate --days 3` to get started.");
    }

    for week in &calendar.weeks {
        println!("Week of {}", week.label()?);

        for day in &week.days {
            print_day(day)?;
        }

        println!();
    }

    println!("{}", calendar.capacity.summary());

    Ok(())
}

fn print_day(day: &CalendarDay) -> anyhow::Result<()> {
    let marker = if day.is_today() { " (today)" } else { "" };
    println!("  {}{marker}", date::format_for_display(&day.date)?);

    for meal_type in MealType::VARIANTS {
        match day.meal(*meal_type) {
            Some(meal) => match meal.recipe.as_ref() {
                Some(recipe) if recipe.total_time_mins() > 0 => println!(
                    "    {meal_type}: {} ({} min)",
                    meal.name,
                    recipe.total_time_mins()
                ),
                _ => println!("    {meal_type}: {}", meal.name),
            },
            None => println!("    {meal_type}: -"),
        }
    }

    Ok(())
}

fn print_meal(meal_type: MealType, value: &str, meal: &MealAssignment) -> anyhow::Result<()> {
    println!("{} - {meal_type}, {}", meal.name, date::format_for_display(value)?);

    let Some(recipe) = meal.recipe.as_ref() else {
        println!("No recipe details available.");
        return Ok(());
    };

    if !recipe.description.is_empty() {
        println!();
        println!("{}", recipe.description);
    }

    println!();
    println!(
        "Prep {} min, cook {} min, total {} min",
        recipe.prep_time_mins,
        recipe.cook_time_mins,
        recipe.total_time_mins()
    );

    if !recipe.ingredients.is_empty() {
        println!();
        println!("Ingredients");

        for ingredient in &recipe.ingredients {
            let amount = [ingredient.quantity.as_str(), ingredient.unit.as_str()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");

            let line = if amount.is_empty() {
                ingredient.item.to_owned()
            } else {
                format!("{amount} {}", ingredient.item)
            };

            match ingredient.notes.as_deref() {
                Some(notes) if !notes.is_empty() => println!("  - {line} ({notes})"),
                _ => println!("  - {line}"),
            }
        }
    }

    if !recipe.instructions.is_empty() {
        println!();
        println!("Instructions");

        for (index, step) in recipe.instructions.iter().enumerate() {
            println!("  {}. {step}", index + 1);
        }
    }

    Ok(())
}
