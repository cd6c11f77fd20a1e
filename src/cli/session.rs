use mealcal::{HttpApi, Planner};
use mealcal_user::RegisterInput;

pub async fn register(
    planner: &Planner<HttpApi>,
    email: String,
    first_name: String,
    last_name: String,
) -> anyhow::Result<()> {
    let password = super::prompt_new_secret("Password")?;

    planner
        .session()
        .register(RegisterInput {
            email: email.clone(),
            first_name,
            last_name,
            password,
        })
        .await?;

    println!("Account created for {email}. Run `mealcal login --email {email}` to sign in.");

    Ok(())
}

pub async fn login(planner: &Planner<HttpApi>, email: &str) -> anyhow::Result<()> {
    let password = super::prompt_secret("Password")?;

    planner.session().login(email, &password).await?;

    if let Some(user) = planner.session().identity() {
        println!("Signed in as {} <{}>", user.full_name(), user.email);
    }

    Ok(())
}

pub fn logout(planner: &Planner<HttpApi>) -> anyhow::Result<()> {
    planner.session().logout();
    println!("Signed out");

    Ok(())
}

pub fn whoami(planner: &Planner<HttpApi>) -> anyhow::Result<()> {
    super::require_login(planner)?;

    let Some(user) = planner.session().identity() else {
        anyhow::bail!("No profile loaded");
    };

    let profile = &user.profile;
    let join = |values: Vec<&str>| {
        if values.is_empty() {
            "-".to_owned()
        } else {
            values.join(", ")
        }
    };

    println!("{} <{}>", user.full_name(), user.email);
    println!(
        "Dietary restrictions: {}",
        join(profile.dietary_restrictions.iter().map(String::as_str).collect())
    );
    println!(
        "Allergies: {}",
        join(profile.allergies.iter().map(String::as_str).collect())
    );
    println!(
        "Disliked ingredients: {}",
        join(profile.disliked_ingredients.iter().map(String::as_str).collect())
    );
    println!(
        "Preferred cuisines: {}",
        join(profile.preferred_cuisines.iter().map(String::as_str).collect())
    );
    println!(
        "Daily target: {} kcal (protein {}%, carbs {}%, fat {}%)",
        profile.target_daily_calories,
        profile.target_macros_pct.protein,
        profile.target_macros_pct.carbs,
        profile.target_macros_pct.fat
    );

    Ok(())
}

pub async fn password(planner: &Planner<HttpApi>) -> anyhow::Result<()> {
    super::require_login(planner)?;

    let old_password = super::prompt_secret("Current password")?;
    let new_password = super::prompt_new_secret("New password")?;

    planner
        .session()
        .change_password(&old_password, &new_password)
        .await?;

    println!("Password changed");

    Ok(())
}
