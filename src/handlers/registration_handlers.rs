use std::net::{IpAddr, Ipv4Addr};

use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::{csrf, rate_limit::RateLimiter};
use crate::errors::{AppError, render};
use crate::models::content::{check_content_table, PageContent};
use crate::models::registration::{self, RegistrationError, Submission, SUCCESS_MESSAGE};
use crate::models::timeslot::{time_options, timeslots_from_table};
use crate::sheets::{SheetCache, CONTENT_SHEET, TIMESLOTS_SHEET};
use crate::templates_structs::{Banner, PAGE_TITLE, RegistrationTemplate, TimeOption};

/// Per-request page state, rebuilt from the (cached) sheets every time.
struct PageData {
    content: PageContent,
    options: Vec<String>,
    notices: Vec<String>,
}

async fn load_page(cache: &SheetCache) -> PageData {
    let (content_table, content_notice) = cache.fetch_or_empty(CONTENT_SHEET).await;
    let (slots_table, slots_notice) = cache.fetch_or_empty(TIMESLOTS_SHEET).await;

    let mut notices: Vec<String> = content_notice.into_iter().chain(slots_notice).collect();
    notices.extend(check_content_table(&content_table));

    // A malformed timeslots sheet hides the picker rather than offering blank slots
    let options = match timeslots_from_table(&slots_table) {
        Ok(slots) => time_options(&slots),
        Err(notice) => {
            notices.push(notice);
            Vec::new()
        }
    };

    PageData {
        content: PageContent::from_table(&content_table),
        options,
        notices,
    }
}

fn page_template(
    data: PageData,
    submission: &Submission,
    banner: Option<Banner>,
    csrf_token: String,
) -> RegistrationTemplate {
    RegistrationTemplate {
        page_title: PAGE_TITLE,
        options: TimeOption::list(&data.options, &submission.selected_times),
        content: data.content,
        notices: data.notices,
        team_code: submission.team_code.clone(),
        banner,
        csrf_token,
    }
}

pub async fn page(
    cache: web::Data<SheetCache>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let data = load_page(&cache).await;
    let csrf_token = csrf::get_or_create_token(&session);
    render(page_template(data, &Submission::default(), None, csrf_token))
}

pub async fn submit(
    req: HttpRequest,
    cache: web::Data<SheetCache>,
    limiter: web::Data<RateLimiter>,
    session: Session,
    body: String,
) -> Result<HttpResponse, AppError> {
    let mut submission = Submission::from_body(&body);
    csrf::validate_csrf(&session, &submission.csrf_token)?;

    let ip = req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    let data = load_page(&cache).await;
    submission.retain_offered(&data.options);

    let result = if limiter.is_blocked(ip) {
        Err(RegistrationError::TooManyAttempts)
    } else {
        registration::validate(&data.content, &submission)
    };

    let accepted = result.is_ok();
    let banner = match result {
        Ok(()) => {
            limiter.clear(ip);
            log::info!(
                "Registration accepted: team={}, times={}",
                submission.team_code,
                submission.selected_times.len()
            );
            Banner::Success(SUCCESS_MESSAGE.to_string())
        }
        Err(e) => {
            if e == RegistrationError::InvalidCode {
                limiter.record_failure(ip);
            }
            log::info!("Registration rejected from {ip}: {e}");
            Banner::Error(e.to_string())
        }
    };

    let csrf_token = if accepted {
        csrf::rotate_token(&session)
    } else {
        csrf::get_or_create_token(&session)
    };
    render(page_template(data, &submission, Some(banner), csrf_token))
}
