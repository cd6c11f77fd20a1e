use mealcal::{HttpApi, Planner};
use mealcal_user::{GoalsInput, MacroSplit, parse_list};

#[derive(Clone, Copy)]
pub enum ListKind {
    Allergies,
    Restrictions,
    Dislikes,
    Cuisines,
}

pub async fn goals(
    planner: &Planner<HttpApi>,
    calories: u32,
    protein: u32,
    carbs: u32,
    fat: u32,
) -> anyhow::Result<()> {
    super::require_login(planner)?;

    planner
        .session()
        .update_goals(GoalsInput {
            target_daily_calories: calories,
            target_macros_pct: MacroSplit {
                protein,
                carbs,
                fat,
            },
        })
        .await?;

    println!("Goals updated: {calories} kcal, protein {protein}%, carbs {carbs}%, fat {fat}%");

    Ok(())
}

pub async fn list(planner: &Planner<HttpApi>, kind: ListKind, values: &str) -> anyhow::Result<()> {
    super::require_login(planner)?;

    let values = parse_list(values);
    let session = planner.session();

    let label = match kind {
        ListKind::Allergies => {
            session.update_allergies(&values).await?;
            "Allergies"
        }
        ListKind::Restrictions => {
            session.update_dietary_restrictions(&values).await?;
            "Dietary restrictions"
        }
        ListKind::Dislikes => {
            session.update_disliked_ingredients(&values).await?;
            "Disliked ingredients"
        }
        ListKind::Cuisines => {
            session.update_preferred_cuisines(&values).await?;
            "Preferred cuisines"
        }
    };

    if values.is_empty() {
        println!("{label} cleared");
    } else {
        println!("{label} updated: {}", values.join(", "));
    }

    Ok(())
}
