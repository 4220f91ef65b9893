use super::*;

#[tokio::test]
async fn empty_clipboard_reads_empty_string() {
    let clipboard = MemoryClipboard::default();
    assert_eq!(clipboard.read().await, "");
    assert_eq!(clipboard.contents().await, None);
}

#[tokio::test]
async fn write_then_read() {
    let clipboard = MemoryClipboard::default();
    clipboard.write("[]".to_owned()).await;
    assert_eq!(clipboard.read().await, "[]");
}

#[tokio::test]
async fn clones_share_contents() {
    let clipboard = MemoryClipboard::with_text("first");
    let other = clipboard.clone();
    other.write("second".to_owned()).await;
    assert_eq!(clipboard.contents().await.as_deref(), Some("second"));
}
