#![allow(dead_code)]

use crux_core::testing::AppTester;
use crux_core::Request;
use crux_http::protocol::{HttpRequest, HttpResponse, HttpResult};
use shared::{App, DashboardConfig, Effect, Event, Model};

pub const TOKEN: &str = "test-token";
pub const LOCATION_URL: &str = "https://ipinfo.io/json?token=test-token";
pub const SAFETY_URL: &str = "http://10.29.26.230:5000/api/safety";

pub type Tester = AppTester<App, Effect>;

pub struct Mounted {
    pub safety: Request<HttpRequest>,
    pub location: Request<HttpRequest>,
    pub rendered: bool,
}

pub fn split_effects(effects: Vec<Effect>) -> (Vec<Request<HttpRequest>>, bool) {
    let mut requests = Vec::new();
    let mut rendered = false;
    for effect in effects {
        match effect {
            Effect::Http(request) => requests.push(request),
            Effect::Render(_) => rendered = true,
        }
    }
    (requests, rendered)
}

pub fn mount(app: &Tester, model: &mut Model) -> Mounted {
    let update = app.update(
        Event::ScreenMounted {
            config: DashboardConfig::new(TOKEN),
        },
        model,
    );
    let (mut requests, rendered) = split_effects(update.effects);
    assert_eq!(requests.len(), 2, "mount should issue exactly two requests");

    let location = requests.pop().expect("location request");
    let safety = requests.pop().expect("safety request");
    Mounted {
        safety,
        location,
        rendered,
    }
}

/// Resolves `request` and feeds every resulting event back into the app.
/// Returns whether any of those updates asked for a render.
pub fn respond(
    app: &Tester,
    model: &mut Model,
    request: &mut Request<HttpRequest>,
    response: HttpResponse,
) -> bool {
    let update = app
        .resolve(request, HttpResult::Ok(response))
        .expect("request should resolve");

    let mut rendered = false;
    for event in update.events {
        let (_, r) = split_effects(app.update(event, model).effects);
        rendered |= r;
    }
    rendered
}

pub fn ok_json(body: &str) -> HttpResponse {
    HttpResponse::ok().body(body).build()
}

pub fn server_error() -> HttpResponse {
    HttpResponse::status(500).build()
}
