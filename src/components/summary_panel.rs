use yew::prelude::*;
use crate::summary::{Summary, SummaryBlock};

#[derive(Properties, PartialEq)]
pub struct SummaryPanelProps {
    pub summary: Summary,
}

#[function_component(SummaryPanel)]
pub fn summary_panel(props: &SummaryPanelProps) -> Html {
    let summary = &props.summary;

    if summary.is_empty() {
        return html! {
            <p class="prefs-summary-empty">{ &summary.placeholder }</p>
        };
    }

    html! {
        <>
            { for summary.blocks.iter().map(|block| match block {
                SummaryBlock::Destination(line) => html! {
                    <div class="prefs-summary-block prefs-summary-destination">
                        <p>{ line }</p>
                    </div>
                },
                SummaryBlock::Flights { heading, lines } => html! {
                    <div class="prefs-summary-block prefs-summary-flights">
                        <h4>{ heading }</h4>
                        <ul>
                            { for lines.iter().map(|line| html! { <li>{ line }</li> }) }
                        </ul>
                    </div>
                },
            })}
        </>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::config::Labels;
    use crate::models::PreferenceSet;
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    async fn render_into_fresh_root(summary: Summary) -> web_sys::Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();
        yew::Renderer::<SummaryPanel>::with_root_and_props(root.clone(), SummaryPanelProps { summary })
            .render();

        let tick = js_sys::Promise::new(&mut |resolve, _| {
            web_sys::window()
                .unwrap()
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0)
                .unwrap();
        });
        JsFuture::from(tick).await.unwrap();
        root
    }

    #[wasm_bindgen_test]
    async fn empty_summary_shows_placeholder() {
        let labels = Labels::default();
        let root = render_into_fresh_root(Summary::build(&PreferenceSet::default(), &labels)).await;
        let placeholder = root.query_selector(".prefs-summary-empty").unwrap().unwrap();
        assert_eq!(placeholder.text_content().unwrap(), labels.empty_summary);
    }

    #[wasm_bindgen_test]
    async fn flight_list_renders_one_item_per_flight() {
        let prefs = PreferenceSet {
            destination: Some("stl".into()),
            flights: vec!["luke-stl-out".into(), "luke-stl-ret".into()],
            ..PreferenceSet::default()
        };
        let root = render_into_fresh_root(Summary::build(&prefs, &Labels::default())).await;

        let destination = root.query_selector(".prefs-summary-destination").unwrap().unwrap();
        assert_eq!(destination.text_content().unwrap(), "Destination: St. Louis (STL)");

        let items = root.query_selector_all(".prefs-summary-flights li").unwrap();
        assert_eq!(items.length(), 2);
        assert_eq!(items.item(0).unwrap().text_content().unwrap(), "Luke STL outbound");
        assert_eq!(items.item(1).unwrap().text_content().unwrap(), "Luke STL return");
        assert!(root.query_selector(".prefs-summary-empty").unwrap().is_none());
    }
}
