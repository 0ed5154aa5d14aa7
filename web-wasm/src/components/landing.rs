//! 初期画面（説明・機能紹介）

use leptos::prelude::*;

const FEATURES: [(&str, &str, &str); 3] = [
    (
        "🛡️",
        "Safety Analysis",
        "Get detailed safety ratings for each ingredient with potential health concerns.",
    ),
    (
        "🍽️",
        "Dietary Compatibility",
        "Check compatibility with vegan, keto, diabetic, and other dietary requirements.",
    ),
    (
        "✨",
        "Smart Alternatives",
        "Discover healthier ingredient alternatives for better food choices.",
    ),
];

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <section class="hero">
            <div class="hero-icon">"🍽️"<span class="sparkle">"✨"</span></div>
            <h2>"Upload a Food Label for Instant Analysis"</h2>
            <p class="text-muted">
                "Get comprehensive ingredient safety ratings, dietary compatibility, "
                "and healthier alternatives powered by advanced AI analysis."
            </p>
        </section>
    }
}

#[component]
pub fn FeatureCards() -> impl IntoView {
    view! {
        <div class="feature-grid">
            {FEATURES
                .into_iter()
                .map(|(icon, title, body)| view! {
                    <div class="card feature-card">
                        <div class="feature-icon">{icon}</div>
                        <h3>{title}</h3>
                        <p class="text-muted">{body}</p>
                    </div>
                })
                .collect_view()}
        </div>
    }
}
