//! 解析エラー表示コンポーネント

use leptos::prelude::*;
use ingredient_lens_common::view::TROUBLESHOOTING_TIPS;

#[component]
pub fn ErrorFallback<F>(error: String, on_retry: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="card error-card">
            <div class="error-icon">"⚠️"</div>
            <h3>"Analysis Failed"</h3>
            <p class="text-muted">{error}</p>

            <button class="btn btn-primary" on:click=move |_| on_retry(())>
                "🔄 Try Again"
            </button>

            <div class="troubleshooting">
                <h4>"Troubleshooting Tips:"</h4>
                <ul>
                    {TROUBLESHOOTING_TIPS
                        .into_iter()
                        .map(|tip| view! { <li>{tip}</li> })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}
