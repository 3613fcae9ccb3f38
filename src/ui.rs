// UI layer: an interactive menu using `dialoguer`. Each entry maps to one
// facade call; network work runs under an `indicatif` spinner.

use crate::api::TexieCloud;
use crate::config::CliConfig;
use crate::preprocess::prepare_jpeg;
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Main interactive menu. Runs until the user chooses "Exit".
pub async fn main_menu(cloud: TexieCloud, config: CliConfig) -> Result<()> {
    loop {
        let items = vec![
            "Configure credentials",
            "Authenticate",
            "Revoke token",
            "Annotate image",
            "Resolve image URL",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(3).interact()?;
        match selection {
            0 => handle_configure(&cloud)?,
            1 => handle_authenticate(&cloud).await?,
            2 => handle_revoke(&cloud).await?,
            3 => handle_annotate(&cloud, &config).await?,
            4 => handle_image_url(&cloud)?,
            5 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Authenticate once at startup when credentials came from the environment.
pub async fn handle_authenticate(cloud: &TexieCloud) -> Result<()> {
    if !cloud.is_configured() {
        println!("Configure credentials first.");
        return Ok(());
    }
    let pb = spinner("Authenticating...")?;
    let result = cloud.authenticate().await;
    pb.finish_and_clear();
    match result {
        Ok(_) => success("Authenticated"),
        Err(e) => failure(&format!("Authentication failed: {}", e)),
    }
    Ok(())
}

fn handle_configure(cloud: &TexieCloud) -> Result<()> {
    let client_id: String = Input::new().with_prompt("Client ID").interact_text()?;
    // `Password` hides the secret while typing.
    let client_secret: String = Password::new().with_prompt("Client secret").interact()?;
    cloud.configure(client_id.trim(), client_secret.trim());
    success("Credentials set");
    Ok(())
}

async fn handle_revoke(cloud: &TexieCloud) -> Result<()> {
    if !cloud.is_configured() {
        println!("Configure credentials first.");
        return Ok(());
    }
    let pb = spinner("Revoking token...")?;
    let result = cloud.revoke().await;
    pb.finish_and_clear();
    match result {
        Ok(()) => success("Token revoked"),
        Err(e) => failure(&format!("Revoke failed: {}", e)),
    }
    Ok(())
}

async fn handle_annotate(cloud: &TexieCloud, config: &CliConfig) -> Result<()> {
    if !cloud.is_authenticated() {
        println!("You should authenticate first to annotate images.");
        return Ok(());
    }
    let Some(path) = choose_image()? else {
        return Ok(());
    };
    let store = Confirm::new()
        .with_prompt("Store the image and result on the server?")
        .default(true)
        .interact()?;

    let raw = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let jpeg = match prepare_jpeg(&raw, &config.prepare) {
        Ok(jpeg) => jpeg,
        Err(e) => {
            failure(&format!("Could not prepare image: {}", e));
            return Ok(());
        }
    };

    let pb = spinner("Uploading...")?;
    let result = cloud.annotate(jpeg, store).await;
    pb.finish_and_clear();

    match result {
        Ok(annotation) => {
            success("Image annotated");
            println!("{}", annotation.recognized_text);
            if let Some(relative) = &annotation.stored_image_url {
                match cloud.image_url(relative) {
                    Ok(url) => println!("Stored image: {}", url),
                    Err(e) => failure(&e.to_string()),
                }
            }
        }
        Err(e) => failure(&format!("Annotation failed: {}", e)),
    }
    Ok(())
}

fn handle_image_url(cloud: &TexieCloud) -> Result<()> {
    let relative: String = Input::new().with_prompt("Relative image path").interact_text()?;
    match cloud.image_url(relative.trim()) {
        Ok(url) => println!("{}", url),
        Err(e) => failure(&e.to_string()),
    }
    Ok(())
}

/// Pick an image with the native file dialog, or type its path.
fn choose_image() -> Result<Option<PathBuf>> {
    let sources = vec!["Browse...", "Type a path"];
    let choice = Select::new().items(&sources).default(0).interact()?;
    if choice == 0 {
        let picked = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png"])
            .pick_file();
        if picked.is_none() {
            println!("No file selected.");
        }
        return Ok(picked);
    }
    let path: String = Input::new().with_prompt("Image file path").interact_text()?;
    Ok(Some(PathBuf::from(path.trim())))
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn success(message: &str) {
    println!("{}", message.green());
}

fn failure(message: &str) {
    println!("{}", message.red());
}
