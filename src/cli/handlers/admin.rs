//! Sponsor, maintenance and watch handlers.

use anyhow::{Context, Result, bail};
use std::thread;
use std::time::Duration;

use super::{Settings, open_app, open_store};
use crate::cli::output::{Output, SponsorListing};
use crate::cli::{
    MaintenanceAction, MaintenanceArgs, SponsorAction, SponsorArgs, SponsorSetArgs, WatchArgs,
};
use crate::domain::{AdSlot, SponsorContent};
use crate::maintenance::Transition;
use crate::store::{ControlFlags, RemoteStore};

// ===========================================
// Sponsors
// ===========================================

pub fn handle_sponsor(args: &SponsorArgs, settings: &Settings) -> Result<()> {
    let mut store = open_store(&settings.data_dir)?;

    match &args.action {
        SponsorAction::Set(set) => {
            let ad = ad_from_args(set)?;
            store
                .put_sponsor(&set.slot, &ad)
                .with_context(|| format!("failed to save sponsor slot {}", set.slot))?;
            println!("Saved sponsor slot {}", set.slot);
        }
        SponsorAction::Rm(rm) => {
            if !store.remove_sponsor(&rm.slot)? {
                bail!("no sponsor slot named '{}'", rm.slot);
            }
            println!("Removed sponsor slot {}", rm.slot);
        }
        SponsorAction::Ls => {
            let board = store.fetch_sponsors().context("failed to load sponsors")?;
            let listings: Vec<SponsorListing> = board
                .iter()
                .map(|(slot, ad)| SponsorListing {
                    slot: slot.to_string(),
                    active: ad.active,
                    kind: match ad.content {
                        SponsorContent::Image { .. } => "image",
                        SponsorContent::Text { .. } => "text",
                    },
                    label: ad.label().to_string(),
                    link: ad.link.clone(),
                })
                .collect();
            if listings.is_empty() {
                println!("No sponsor slots.");
            }
            for l in &listings {
                println!(
                    "{:<16}  {:<8}  {:<5}  {}",
                    l.slot,
                    if l.active { "active" } else { "inactive" },
                    l.kind,
                    l.label
                );
            }
        }
    }
    Ok(())
}

/// Builds a sponsor slot from `sponsor set` flags.
pub(crate) fn ad_from_args(args: &SponsorSetArgs) -> Result<AdSlot> {
    let content = match (&args.image, &args.title) {
        (Some(image_url), title) => SponsorContent::Image {
            image_url: image_url.clone(),
            title: title.clone(),
        },
        (None, Some(title)) => SponsorContent::Text {
            title: title.clone(),
            body: args.body.clone().unwrap_or_default(),
            cta_text: args.cta.clone(),
        },
        (None, None) => bail!("a sponsor needs --image or --title"),
    };
    Ok(AdSlot {
        active: !args.inactive,
        link: args.link.clone(),
        content,
    })
}

// ===========================================
// Maintenance
// ===========================================

pub fn handle_maintenance(args: &MaintenanceArgs, settings: &Settings) -> Result<()> {
    let mut store = open_store(&settings.data_dir)?;

    let flags = match args.action {
        MaintenanceAction::On { lock } => ControlFlags {
            maintenance: true,
            locked: lock,
        },
        MaintenanceAction::Off => ControlFlags::default(),
        MaintenanceAction::Status => {
            let flags = store.control_flags()?;
            println!("{}", serde_json::to_string_pretty(&Output::new(flags))?);
            return Ok(());
        }
    };

    store
        .set_control(flags)
        .context("failed to update control document")?;
    println!(
        "Maintenance {}{}",
        if flags.maintenance { "on" } else { "off" },
        if flags.locked { " (reads locked)" } else { "" }
    );
    Ok(())
}

// ===========================================
// Watch
// ===========================================

/// Polls the control document and prints each maintenance transition.
pub fn handle_watch(args: &WatchArgs, settings: &Settings) -> Result<()> {
    let mut app = open_app(settings)?;
    let interval = Duration::from_millis(args.interval_ms);

    let mut polls = 0;
    loop {
        match app.poll_control() {
            Ok(Transition::Entered) => println!("maintenance"),
            Ok(Transition::Left) => println!("operational ({} notes)", app.catalog().len()),
            Ok(Transition::Unchanged) if polls == 0 => println!("operational"),
            Ok(Transition::Unchanged) => {}
            Err(e) => eprintln!("warning: {}", e),
        }

        polls += 1;
        if args.count.is_some_and(|n| polls >= n) {
            break;
        }
        thread::sleep(interval);
    }
    Ok(())
}
