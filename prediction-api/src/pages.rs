use common::ModelStatus;

const INDEX_TEMPLATE: &str = include_str!("../pages/index.html");

/// Landing page with the current model status
pub fn render_index(status: ModelStatus) -> String {
    let label = match status {
        ModelStatus::Ok => "Modelo listo",
        ModelStatus::Loading => "Cargando modelo...",
        ModelStatus::Failed => "Error al cargar el modelo",
    };

    INDEX_TEMPLATE
        .replace("{{status}}", status.as_str())
        .replace("{{status_label}}", label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_index_ok() {
        let html = render_index(ModelStatus::Ok);
        assert!(html.contains("status-ok"));
        assert!(html.contains("Modelo listo"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_render_index_failed() {
        let html = render_index(ModelStatus::Failed);
        assert!(html.contains("status-failed"));
        assert!(html.contains("Error al cargar el modelo"));
    }
}
