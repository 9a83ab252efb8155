use dioxus::prelude::*;

use crate::components::MusicToggle;

const PAGE_CSS: &str = r#"
.music-toggle {
    position: fixed;
    right: 1.25rem;
    bottom: 1.25rem;
    width: 3rem;
    height: 3rem;
    border: none;
    border-radius: 9999px;
    font-size: 1.5rem;
    cursor: pointer;
    background: rgba(24, 24, 27, 0.85);
    color: #fafafa;
}
.music-toggle:disabled {
    cursor: default;
    opacity: 0.5;
}
"#;

/// Page shell hosting the floating music toggle.
#[component]
pub fn AppView() -> Element {
    rsx! {
        document::Title { "Background Music" }
        document::Style { "{PAGE_CSS}" }
        main { class: "page",
            MusicToggle {}
        }
    }
}
