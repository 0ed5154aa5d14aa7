//! 解析結果表示コンポーネント

use leptos::prelude::*;
use ingredient_lens_common::view::{NO_ALTERNATIVES, NO_CONCERNS};
use ingredient_lens_common::{AnalysisResult, DietaryFilterSet, Ingredient};

#[component]
pub fn ResultsTable(
    result: AnalysisResult,
    #[prop(into)] filters: Signal<DietaryFilterSet>,
) -> impl IntoView {
    let rating = result.overall_rating;
    let compat = result.dietary_compatibility;
    let rows = move || filters.with(|f| f.project(&compat));

    view! {
        <div class="results-table">
            <div class=format!("card overall-card rating-{}", rating.as_str())>
                <div class="overall-heading">
                    <span class="rating-icon">{rating.icon()}</span>
                    <h2>{rating.headline()}</h2>
                </div>
                <p>{result.summary.clone()}</p>
            </div>

            <Show when=move || !rows().is_empty()>
                <div class="card">
                    <h3>"Dietary Compatibility"</h3>
                    <div class="compat-grid">
                        {move || rows()
                            .into_iter()
                            .map(|(diet, compatible)| view! {
                                <div class={if compatible { "compat compatible" } else { "compat incompatible" }}>
                                    <span>{if compatible { "✔" } else { "✘" }}</span>
                                    <span class="compat-name">{diet.display_name()}</span>
                                </div>
                            })
                            .collect_view()}
                    </div>
                </div>
            </Show>

            <div class="card ingredients">
                <h3>"Ingredient Analysis"</h3>
                <table>
                    <thead>
                        <tr>
                            <th>"Ingredient"</th>
                            <th>"Safety Rating"</th>
                            <th>"Concerns"</th>
                            <th>"Alternatives"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {result.ingredients.into_iter().map(ingredient_row).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

fn ingredient_row(ingredient: Ingredient) -> impl IntoView {
    let rating = ingredient.safety_rating;
    let alternatives = ingredient.alternatives.unwrap_or_default();

    view! {
        <tr>
            <td class="ingredient-name">{ingredient.name}</td>
            <td>
                <span class=format!("rating rating-{}", rating.as_str())>
                    {rating.icon()}" "{rating.as_str()}
                </span>
            </td>
            <td>
                {if ingredient.concerns.is_empty() {
                    view! { <span class="placeholder">{NO_CONCERNS}</span> }.into_any()
                } else {
                    view! {
                        <ul class="concerns">
                            {ingredient.concerns.into_iter().map(|c| view! { <li>{c}</li> }).collect_view()}
                        </ul>
                    }
                    .into_any()
                }}
            </td>
            <td>
                {if alternatives.is_empty() {
                    view! { <span class="placeholder">{NO_ALTERNATIVES}</span> }.into_any()
                } else {
                    alternatives
                        .into_iter()
                        .map(|a| view! { <span class="alternative">{a}</span> })
                        .collect_view()
                        .into_any()
                }}
            </td>
        </tr>
    }
}
