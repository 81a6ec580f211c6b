use anyhow::Result;
use cucumber::World;
use newsletter_widget::config::WidgetConfig;
use newsletter_widget::{
    HostDocument, HttpBackend, ModalPhase, Outcome, WidgetController, WidgetInput,
};
use reqwest::Url;
use std::time::Duration;
use wiremock::{Mock, MockServer, ResponseTemplate};
use wiremock::matchers::{method, path};

/// Page embedding the trigger
pub const PAGE: &str = r##"<main><h1>Guide</h1><a id="newsletterTrigger" href="#">Newsletter</a></main>"##;

/// Modal fragment served from the site's static resources
pub const FRAGMENT: &str = r#"<div class="newsletter-modal">
    <span class="modal-close">&times;</span>
    <form id="newsletterForm" method="post">
        <input type="hidden" name="list_id" value="docs-weekly">
        <input type="email" id="newsletterEmail" name="EMAIL">
        <button type="submit" class="newsletter-btn" disabled>Subscribe</button>
    </form>
    <div class="message-box"></div>
</div>"#;

const WAIT_LIMIT: Duration = Duration::from_secs(5);

/// Widget mounted on a page served by a mock site
#[derive(World, Default)]
pub struct NewsletterWorld {
    pub server: Option<MockServer>,
    /// Page body when it differs from `PAGE`
    pub page: Option<String>,
    pub controller: Option<WidgetController<HttpBackend, HostDocument>>,
    pub last_error: Option<String>,
    pub attach_error: Option<String>,
    pub outcome: Option<Outcome>,
}

impl std::fmt::Debug for NewsletterWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsletterWorld")
            .field("phase", &self.controller.as_ref().map(|c| c.phase()))
            .field("last_error", &self.last_error)
            .field("outcome", &self.outcome)
            .finish()
    }
}

impl NewsletterWorld {
    pub async fn start_site(&mut self, fragment_status: u16) {
        let server = MockServer::start().await;
        let template = if fragment_status == 200 {
            ResponseTemplate::new(200).set_body_string(FRAGMENT)
        } else {
            ResponseTemplate::new(fragment_status)
        };
        Mock::given(method("GET"))
            .and(path("/docs/_static/html/newsletter.html"))
            .respond_with(template)
            .mount(&server)
            .await;
        self.server = Some(server);
    }

    pub async fn answer_signups_with(&mut self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/subscribe"))
            .respond_with(ResponseTemplate::new(status))
            .mount(self.server())
            .await;
    }

    pub fn server(&self) -> &MockServer {
        self.server.as_ref().expect("mock site not started")
    }

    pub fn controller(&mut self) -> &mut WidgetController<HttpBackend, HostDocument> {
        if self.controller.is_none() {
            let uri = self.server().uri();
            let config = WidgetConfig::new(
                Url::parse(&format!("{uri}/docs/index.html")).expect("page url"),
                Url::parse(&format!("{uri}/subscribe")).expect("endpoint url"),
            );
            let backend = HttpBackend::new(&config).expect("http backend");
            let page = self.page.clone().unwrap_or_else(|| PAGE.to_string());
            let mut controller =
                WidgetController::from_config(&config, backend, HostDocument::new(page));
            if let Err(e) = controller.attach_trigger() {
                self.attach_error = Some(e.to_string());
            }
            self.controller = Some(controller);
        }
        self.controller.as_mut().expect("controller just created")
    }

    pub fn document(&self) -> &HostDocument {
        self.controller
            .as_ref()
            .expect("widget not attached")
            .renderer()
    }

    pub fn input(&mut self, input: WidgetInput) {
        if let Err(e) = self.controller().handle_input(input) {
            self.last_error = Some(e.to_string());
        }
    }

    pub async fn settle(&mut self) -> Result<ModalPhase> {
        let controller = self.controller();
        tokio::time::timeout(WAIT_LIMIT, controller.settle()).await?
    }

    /// Apply messages until the submission resolves or the modal is gone
    pub async fn wait_for_outcome(&mut self) -> Result<()> {
        let controller = self.controller();
        let outcome = tokio::time::timeout(WAIT_LIMIT, next_outcome(controller)).await??;
        self.outcome = outcome;
        Ok(())
    }

    /// Bodies of every signup the endpoint received
    pub async fn signup_bodies(&self) -> Vec<String> {
        self.server()
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == "/subscribe")
            .map(|request| String::from_utf8_lossy(&request.body).into_owned())
            .collect()
    }
}

async fn next_outcome(
    controller: &mut WidgetController<HttpBackend, HostDocument>,
) -> Result<Option<Outcome>> {
    loop {
        match controller.phase() {
            ModalPhase::Resolved(outcome) => return Ok(Some(outcome)),
            ModalPhase::Closed => return Ok(None),
            _ => controller.process_next_message().await?,
        }
    }
}
