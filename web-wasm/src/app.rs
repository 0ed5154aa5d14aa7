//! メインアプリケーションコンポーネント

use std::sync::Arc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::{
    dietary_filters::DietaryFilters,
    error_fallback::ErrorFallback,
    header::Header,
    landing::{FeatureCards, Hero},
    results_table::ResultsTable,
    upload_area::UploadArea,
};
use crate::timer::GlooSleeper;
use ingredient_lens_common::view::DISCLAIMER;
use ingredient_lens_common::{
    analyze_with_timeout, AnalysisSession, DietaryType, LabelImage, MockAnalyzer,
};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 状態はセッション1つに集約
    let (session, set_session) = signal(AnalysisSession::new());
    let analyzer = Arc::new(MockAnalyzer::with_default_config(GlooSleeper));

    let upload_state = Memo::new(move |_| session.with(|s| s.upload_state()));
    let result = Memo::new(move |_| session.with(|s| s.result().cloned()));
    let filters = Memo::new(move |_| session.with(|s| s.filters().clone()));

    let is_busy = Signal::derive(move || upload_state.with(|u| u.is_analyzing));
    let has_result = Signal::derive(move || upload_state.with(|u| u.has_result));
    let error = Signal::derive(move || upload_state.with(|u| u.error.clone()));
    let show_upload = move || upload_state.with(|u| !u.has_result && u.error.is_none());

    // 画像アップロード → 解析
    let on_image_upload = move |image: LabelImage| {
        let mut ticket = None;
        set_session.update(|s| match s.begin(&image) {
            Ok(t) => ticket = Some(t),
            Err(e) => tracing::warn!(file = %image.file_name, error = %e, "upload ignored"),
        });
        let Some(ticket) = ticket else {
            return;
        };

        let analyzer = Arc::clone(&analyzer);
        spawn_local(async move {
            let timeout = analyzer.config().timeout();
            let outcome = analyze_with_timeout(analyzer.as_ref(), &GlooSleeper, &image, timeout).await;
            set_session.update(|s| {
                s.finish(ticket, outcome);
            });
        });
    };

    let on_retry = move |_: ()| set_session.update(|s| s.retry());
    let on_reset = move |_: ()| set_session.update(|s| s.reset());
    let on_toggle = move |diet: DietaryType| set_session.update(|s| s.toggle_filter(diet));

    view! {
        <div class="app">
            <Header has_result=has_result on_reset=on_reset />

            <main class="container">
                <Show when=show_upload>
                    <div class="landing">
                        <Hero />
                        <UploadArea is_busy=is_busy on_image_upload=on_image_upload.clone() />
                        <FeatureCards />
                    </div>
                </Show>

                {move || error.get().map(|error| view! {
                    <ErrorFallback error=error on_retry=on_retry />
                })}

                {move || result.get().map(|result| view! {
                    <div class="results">
                        <DietaryFilters selected=filters on_toggle=on_toggle />
                        <ResultsTable result=result filters=filters />
                    </div>
                })}
            </main>

            <footer class="footer">
                <p><strong>"Disclaimer: "</strong>{DISCLAIMER}</p>
                <p class="text-muted">
                    "Always consult with healthcare professionals for specific dietary requirements or health concerns."
                </p>
            </footer>
        </div>
    }
}
