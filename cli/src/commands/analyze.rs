use std::path::PathBuf;

use anyhow::bail;
use labeliq_core::domain::orchestrator::entities::{
    Action, CAMERA_ACCESS_FAILED, ScanView, Screen, UserAction,
};

use super::{Session, SessionSettings, render::render_result};

pub async fn analyze_text(settings: &SessionSettings, text: String) -> Result<(), anyhow::Error> {
    let mut session = settings.start(None).await;

    session.dispatch(Action::EditManualText(text)).await;
    if !session
        .orchestrator()
        .available_actions()
        .contains(&UserAction::AnalyzeText)
    {
        bail!("nothing to analyze: the ingredient text is empty");
    }

    session.dispatch(Action::SubmitManualText).await;
    finish(session).await
}

pub async fn scan(settings: &SessionSettings, image: PathBuf) -> Result<(), anyhow::Error> {
    let mut session = settings.start(Some(image)).await;

    session.dispatch(Action::StartScan).await;
    ensure_camera(&session)?;

    session.dispatch(Action::TakePhoto).await;
    ensure_camera(&session)?;

    finish(session).await
}

fn ensure_camera(session: &Session) -> Result<(), anyhow::Error> {
    if let Screen::Scan(ScanView::Failed(reason)) = session.screen() {
        bail!("{} ({})", CAMERA_ACCESS_FAILED, reason);
    }
    Ok(())
}

async fn finish(mut session: Session) -> Result<(), anyhow::Error> {
    while session.screen().is_analyzing() {
        session.pump().await;
    }

    if let Some(result) = session.screen().result() {
        println!("{}", render_result(result));
        return Ok(());
    }

    match session.take_notice() {
        Some(notice) => bail!(notice.message),
        None => bail!("analysis did not complete"),
    }
}
