//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップ / ファイル選択 → プレビュー表示 → 解析開始。
//! 解析中は操作不可、プレビューの削除は解析中以外のみ。

use leptos::html;
use leptos::prelude::*;
use web_sys::{DragEvent, Event, File, HtmlInputElement, Url};

use ingredient_lens_common::view::{UploadControls, UPLOAD_HINT};
use ingredient_lens_common::LabelImage;

#[component]
pub fn UploadArea<F>(
    #[prop(into)] is_busy: Signal<bool>,
    on_image_upload: F,
) -> impl IntoView
where
    F: Fn(LabelImage) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let (preview_url, set_preview_url) = signal(None::<String>);
    let file_input: NodeRef<html::Input> = NodeRef::new();

    let controls = move || UploadControls::new(is_busy.get(), preview_url.with(Option::is_some));

    let handle_file = move |file: File| {
        let image = LabelImage::new(file.name(), file.type_(), file.size() as u64);
        if !image.is_image() {
            tracing::debug!(file = %image.file_name, mime = %image.mime_type, "non-image file ignored");
            return;
        }

        match Url::create_object_url_with_blob(&file) {
            Ok(url) => {
                revoke(preview_url.get_untracked());
                set_preview_url.set(Some(url));
            }
            Err(e) => tracing::warn!("preview unavailable: {:?}", e),
        }
        on_image_upload(image);
    };

    let on_drag = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        match ev.type_().as_str() {
            "dragenter" | "dragover" => set_is_dragover.set(!is_busy.get_untracked()),
            "dragleave" => set_is_dragover.set(false),
            _ => {}
        }
    };

    let on_drop = {
        let handle_file = handle_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            ev.stop_propagation();
            set_is_dragover.set(false);

            if is_busy.get_untracked() {
                return;
            }

            if let Some(file) = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0))
            {
                handle_file(file);
            }
        }
    };

    let on_change = {
        let handle_file = handle_file.clone();
        move |ev: Event| {
            let input: HtmlInputElement = event_target(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                handle_file(file);
            }
        }
    };

    let clear_image = move |_| {
        if !controls().can_clear {
            return;
        }
        revoke(preview_url.get_untracked());
        set_preview_url.set(None);
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
    };

    on_cleanup(move || revoke(preview_url.get_untracked()));

    view! {
        <div class="upload-wrapper">
            <Show
                when=move || preview_url.with(Option::is_some)
                fallback=move || view! {
                    <div
                        class=move || {
                            let mut classes = vec!["upload-area"];
                            if is_dragover.get() {
                                classes.push("dragover");
                            }
                            if controls().input_disabled {
                                classes.push("disabled");
                            }
                            classes.join(" ")
                        }
                        on:dragenter=on_drag
                        on:dragleave=on_drag
                        on:dragover=on_drag
                        on:drop=on_drop.clone()
                    >
                        <input
                            node_ref=file_input
                            type="file"
                            accept="image/*"
                            class="upload-input"
                            disabled=move || controls().input_disabled
                            on:change=on_change.clone()
                        />
                        <div class="upload-icon">"📤"</div>
                        <h3>"Upload Ingredient Label"</h3>
                        <p class="text-muted">"Drag and drop an image or click to browse"</p>
                        <p class="upload-hint">"📷 "{UPLOAD_HINT}</p>
                    </div>
                }
            >
                <div class="preview">
                    <img
                        src=move || preview_url.get().unwrap_or_default()
                        alt="Uploaded ingredient label"
                    />
                    <Show when=move || controls().can_clear>
                        <button class="btn-clear" title="Remove image" on:click=clear_image>
                            "✕"
                        </button>
                    </Show>
                    <Show when=move || controls().show_overlay>
                        <div class="preview-overlay">
                            <div class="spinner"></div>
                            <p>"Analyzing ingredients..."</p>
                        </div>
                    </Show>
                </div>
            </Show>
        </div>
    }
}

fn revoke(url: Option<String>) {
    if let Some(url) = url {
        if let Err(e) = Url::revoke_object_url(&url) {
            tracing::debug!("preview revoke failed: {:?}", e);
        }
    }
}
