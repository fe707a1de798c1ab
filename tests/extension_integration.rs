//! Block invocations routed through the extension facade.

mod common;

use anyhow::Result;
use owls_client::{Error, Extension, Locale, Session, Status};
use serde_json::json;

use common::{MockController, Seen};

#[tokio::test]
async fn blocks_drive_the_controller() -> Result<()> {
    let mut controller = MockController::with_pixels(60).await;
    let extension = Extension::new(Session::new(), Locale::from_language_tag("nl-NL"));

    let result = extension
        .invoke("cnct", &[json!(controller.host()), json!(controller.port())])
        .await?;
    assert_eq!(result, None);
    controller.expect_handshake().await;

    let status = serde_json::to_value(extension.status())?;
    assert_eq!(status, json!({ "status": 2, "msg": "ready" }));

    extension.invoke("autoShow", &[json!("Uit")]).await?;
    controller.expect_text("autoshow off").await;

    extension
        .invoke("setPixels", &[json!("12"), json!(300), json!(-4)])
        .await?;
    controller.expect_text("setpixels 12 255 0").await;

    extension
        .invoke("setPixel", &[json!(3), json!(1), json!(2), json!(3)])
        .await?;
    controller.expect_text("setpixel 3 1 2 3").await;

    extension.invoke("shiftPixels", &[json!("Links")]).await?;
    controller.expect_text("shift left").await;

    extension.invoke("setPixelCount", &[json!(100)]).await?;
    controller.expect_text("setVirtualPixels 60").await;

    let count = extension.invoke("getPixelCount", &[]).await?;
    assert_eq!(count, Some(json!(60)));

    extension.invoke("show", &[]).await?;
    controller.expect_text("show").await;

    extension.invoke("discnct", &[]).await?;
    controller.expect_text("clear").await;
    assert_eq!(controller.next().await, Seen::Closed);

    assert_eq!(extension.status().status, Status::NotReady);
    Ok(())
}

#[tokio::test]
async fn failed_connect_is_not_an_error() -> Result<()> {
    let controller = MockController::replying("not a number").await;
    let extension = Extension::new(Session::new(), Locale::English);

    let result = extension
        .invoke("cnct", &[json!(controller.host()), json!(controller.port())])
        .await?;
    assert_eq!(result, None);
    assert_eq!(extension.status().status, Status::NotReady);
    Ok(())
}

#[tokio::test]
async fn bad_port_is_rejected() {
    let extension = Extension::new(Session::new(), Locale::English);

    let err = extension
        .invoke("cnct", &[json!("localhost"), json!("http")])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn shutdown_hook_closes_connection() -> Result<()> {
    let mut controller = MockController::with_pixels(16).await;
    let extension = Extension::new(Session::new(), Locale::English);

    extension
        .invoke("cnct", &[json!(controller.host()), json!(controller.port())])
        .await?;
    controller.expect_handshake().await;

    extension.shutdown();
    controller.expect_text("clear").await;
    assert_eq!(controller.next().await, Seen::Closed);
    assert_eq!(extension.session().get_pixel_count(), 16);
    Ok(())
}
