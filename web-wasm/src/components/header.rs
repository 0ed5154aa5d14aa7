//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header<F>(
    #[prop(into)] has_result: Signal<bool>,
    on_reset: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <header class="header">
            <div class="header-inner">
                <div class="brand">
                    <div class="brand-icon">"🛡️"</div>
                    <div>
                        <h1>"Ingredient Safety Analyzer"</h1>
                        <p class="text-muted">"AI-powered food safety analysis for better health choices"</p>
                    </div>
                </div>
                <Show when=move || has_result.get()>
                    <button
                        class="btn btn-primary"
                        on:click={
                            let on_reset = on_reset.clone();
                            move |_| on_reset(())
                        }
                    >
                        "Analyze New Product"
                    </button>
                </Show>
            </div>
        </header>
    }
}
