use crate::domain::model::RobotOrder;
use crate::domain::ports::OrderPage;
use crate::utils::error::{OrderError, Result};
use std::time::Duration;

pub const INTRO_OK_LABEL: &str = "OK";

const HEAD_SELECT: &str = "#head";
const LEGS_INPUT: &str = "input[placeholder='Enter the part number for the legs']";
const ADDRESS_INPUT: &str = "#address";
const ORDER_BUTTON: &str = "#order";
const ERROR_ALERT: &str = "div[class='alert alert-danger'][role='alert']";

fn body_radio(value: &str) -> String {
    format!("input[name='body'][value='{}']", value)
}

/// Submission progress for one order. The attempt counter lives in the state
/// value itself; there is no counter outside the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Filling { attempt: u32 },
    Checking { attempt: u32 },
    Succeeded { attempts: u32 },
    Exhausted { attempts: u32 },
}

/// Drive the order form to submission, retrying while the error alert stays
/// visible, up to `max_attempts`. Returns the number of attempts used.
///
/// The intro modal is dismissed before the first form access. A selector that
/// never appears propagates as `ElementTimeout` and is not retried; only the
/// visible-alert rejection is, with a page reload between attempts.
pub async fn submit_order<P: OrderPage + ?Sized>(
    page: &P,
    order: &RobotOrder,
    max_attempts: u32,
    selector_timeout: Duration,
    settle_delay: Duration,
) -> Result<u32> {
    page.click_button_labeled(INTRO_OK_LABEL, selector_timeout)
        .await?;

    tracing::debug!(order_number = %order.order_number, "filling the robot order form");

    let mut state = SubmitState::Filling { attempt: 1 };
    loop {
        state = match state {
            SubmitState::Filling { attempt } => {
                page.wait_for_selector(HEAD_SELECT, selector_timeout).await?;
                page.select_option(HEAD_SELECT, &order.head).await?;
                page.check(&body_radio(&order.body)).await?;
                page.fill(LEGS_INPUT, &order.legs).await?;
                page.fill(ADDRESS_INPUT, &order.address).await?;
                page.click(ORDER_BUTTON).await?;
                page.settle(settle_delay).await?;
                SubmitState::Checking { attempt }
            }
            SubmitState::Checking { attempt } => {
                if !page.is_visible(ERROR_ALERT).await? {
                    SubmitState::Succeeded { attempts: attempt }
                } else {
                    tracing::warn!(
                        order_number = %order.order_number,
                        attempt,
                        max_attempts,
                        "order submission rejected, retrying"
                    );
                    page.reload().await?;
                    if attempt < max_attempts {
                        SubmitState::Filling {
                            attempt: attempt + 1,
                        }
                    } else {
                        SubmitState::Exhausted {
                            attempts: max_attempts,
                        }
                    }
                }
            }
            SubmitState::Succeeded { attempts } => return Ok(attempts),
            SubmitState::Exhausted { attempts } => {
                return Err(OrderError::SubmissionExhausted {
                    order_number: order.order_number.clone(),
                    attempts,
                })
            }
        };
    }
}
