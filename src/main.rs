use dioxus::prelude::*;

mod components;
mod config;
mod db;
mod error;

use components::AppView;

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#a38449" }

        AppView {}
    }
}
