//! The single HTML page.

use crate::web::state::AppState;
use axum::{extract::State, response::Html};
use nico_domain::{GeminiModel, GenerationParams};
use tracing::warn;

const TEMPLATE: &str = include_str!("../templates/index.html");

/// Values filled into the page template.
#[derive(Debug, Clone)]
pub struct PageView {
    pub title: String,
    pub models: Vec<GeminiModel>,
    pub model: GeminiModel,
    pub params: GenerationParams,
    pub system_prompt: String,
    /// `None` when background video is disabled.
    pub clip_count: Option<usize>,
}

impl PageView {
    pub fn from_state(state: &AppState, clip_count: Option<usize>) -> Self {
        Self {
            title: state.title.clone(),
            models: state.models.clone(),
            model: state.settings.model.clone(),
            params: state.settings.params,
            system_prompt: state.settings.template.system_prompt.clone(),
            clip_count,
        }
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let clip_count = match state.use_case.videos().cloned() {
        Some(videos) => {
            let listed = tokio::task::spawn_blocking(move || videos.clips()).await;
            match listed {
                Ok(Ok(clips)) => Some(clips.len()),
                Ok(Err(e)) => {
                    warn!("Could not list clips: {}", e);
                    Some(0)
                }
                Err(e) => {
                    warn!("Clip listing task failed: {}", e);
                    Some(0)
                }
            }
        }
        None => None,
    };
    Html(render_page(&PageView::from_state(&state, clip_count)))
}

/// Fill the page template.
pub fn render_page(view: &PageView) -> String {
    let mut models = view.models.clone();
    if !models.contains(&view.model) {
        models.insert(0, view.model.clone());
    }
    let options: String = models
        .iter()
        .map(|m| {
            let name = escape_html(m.as_str());
            let selected = if *m == view.model { " selected" } else { "" };
            format!("<option value=\"{name}\"{selected}>{name}</option>")
        })
        .collect();

    let clips = match view.clip_count {
        Some(n) => format!("Videos found: {n}"),
        None => String::new(),
    };

    TEMPLATE
        .replace("{{ title }}", &escape_html(&view.title))
        .replace("{{ model_options }}", &options)
        .replace("{{ temperature }}", &view.params.temperature.to_string())
        .replace("{{ top_p }}", &view.params.top_p.to_string())
        .replace("{{ max_tokens }}", &view.params.max_output_tokens.to_string())
        .replace("{{ clip_count }}", &clips)
        .replace("{{ system_prompt }}", &escape_html(&view.system_prompt))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(title: &str) -> PageView {
        PageView {
            title: title.to_string(),
            models: GeminiModel::selectable(),
            model: GeminiModel::Gemini15Pro,
            params: GenerationParams::default(),
            system_prompt: "Eres Nico.".to_string(),
            clip_count: Some(3),
        }
    }

    #[test]
    fn page_has_title_and_event_stream() {
        let html = render_page(&view("Hola soy Nico"));
        assert!(html.contains("<title>Hola soy Nico</title>"));
        assert!(!html.contains("{{"));
        assert!(html.contains("new EventSource"));
        assert!(html.contains("/api/ask?"));
    }

    #[test]
    fn sidebar_reflects_server_defaults() {
        let html = render_page(&view("x"));
        assert!(html.contains("<option value=\"gemini-1.5-pro\" selected>gemini-1.5-pro</option>"));
        assert!(html.contains("<option value=\"gemini-2.0-flash-lite-001\">"));
        assert!(html.contains("id=\"temperature\" type=\"range\" min=\"0\" max=\"1.5\" step=\"0.05\" value=\"0.7\""));
        assert!(html.contains("id=\"top_p\" type=\"range\" min=\"0.05\" max=\"1\" step=\"0.05\" value=\"0.9\""));
        assert!(html.contains("id=\"max_tokens\" type=\"range\" min=\"32\" max=\"2048\" step=\"16\" value=\"200\""));
        assert!(html.contains(">Eres Nico.</textarea>"));
        assert!(html.contains("Videos found: 3"));
    }

    #[test]
    fn custom_default_model_is_listed() {
        let mut v = view("x");
        v.model = GeminiModel::Custom("gemini-exp".to_string());
        v.clip_count = None;
        let html = render_page(&v);
        assert!(html.contains("<option value=\"gemini-exp\" selected>"));
        assert!(!html.contains("Videos found"));
    }

    #[test]
    fn video_element_loops_muted_inline() {
        let html = render_page(&view("x"));
        let video = html
            .lines()
            .find(|l| l.contains("<video"))
            .expect("video element");
        for attr in ["autoplay", "loop", "muted", "playsinline", "width=\"320\"", "height=\"180\""] {
            assert!(video.contains(attr), "missing {attr}");
        }
    }

    #[test]
    fn title_and_prompt_are_escaped() {
        let mut v = view("<b>Nico & co</b>");
        v.system_prompt = "</textarea><script>".to_string();
        let html = render_page(&v);
        assert!(html.contains("&lt;b&gt;Nico &amp; co&lt;/b&gt;"));
        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;"));
    }

    #[test]
    fn dropped_connection_closes_the_source() {
        let html = render_page(&view("x"));
        assert!(html.contains("if (!ev.data) { source.close(); source = null; return; }"));
    }
}
