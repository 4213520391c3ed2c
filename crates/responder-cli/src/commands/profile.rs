use anyhow::Result;
use responder_application::ResponderUseCase;
use responder_core::profile::Profile;

use crate::cli::ProfileAction;

pub fn handle(usecase: &ResponderUseCase, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Show => print_profile(&usecase.profile()?),
        ProfileAction::Set {
            name,
            role,
            language,
            skills,
            experience,
            portfolio,
        } => {
            let mut profile = usecase.profile()?;
            if let Some(name) = name {
                profile.name = name;
            }
            if let Some(role) = role {
                profile.role = role.as_str().into();
            }
            if let Some(language) = language {
                profile.language = language.as_str().into();
            }
            if let Some(skills) = skills {
                profile.skills = skills;
            }
            if let Some(experience) = experience {
                profile.experience = experience;
            }
            if let Some(portfolio) = portfolio {
                profile.portfolio_url = Some(portfolio);
            }

            let saved = usecase.update_profile(profile)?;
            println!("✓ Profile updated");
            print_profile(&saved);
        }
    }
    Ok(())
}

fn print_profile(profile: &Profile) {
    println!("Name:       {}", profile.name);
    println!("Role:       {}", profile.role);
    println!("Language:   {}", profile.language);
    println!("Skills:     {}", profile.skills);
    println!("Experience: {}", profile.experience);
    if let Some(url) = profile.portfolio() {
        println!("Portfolio:  {url}");
    }
}
