use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use giron_client::{ClientConfig, DiscussionApiClient};
use giron_core::discussion::DiscussionService;
use giron_core::persona::CreatePersonaRequest;

pub async fn list() -> Result<()> {
    let config = ClientConfig::load()?;
    let client = DiscussionApiClient::new(&config)?;

    let personas = client
        .get_personas()
        .await
        .context("ペルソナ一覧を取得できませんでした")?;

    if personas.is_empty() {
        println!("登録されているペルソナはいません");
        return Ok(());
    }

    for persona in personas {
        println!(
            "{} {} ({}) - {}",
            persona.display_icon(),
            persona.name.bold(),
            persona.position,
            persona.role
        );
        println!("    {}", persona.speaking_style.dimmed());
    }

    Ok(())
}

pub async fn add(
    name: String,
    role: String,
    position: String,
    speaking_style: String,
    icon: Option<String>,
    image: Option<PathBuf>,
) -> Result<()> {
    let config = ClientConfig::load()?;
    let client = DiscussionApiClient::new(&config)?;

    let request = CreatePersonaRequest {
        name,
        role,
        position,
        speaking_style,
        icon,
        image_path: image,
    };

    let persona = client
        .create_persona(&request)
        .await
        .context("ペルソナを登録できませんでした")?;

    println!(
        "{} {} を登録しました",
        persona.display_icon(),
        persona.name.bold()
    );

    Ok(())
}
