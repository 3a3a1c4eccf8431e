// --- File: crates/commerce_usegateway/src/lang.rs ---
//! Built-in language packs for the `usegateway` lexicon.

use commerce_common::Lexicon;

/// Name of the language pack requested from the host.
pub const LEXICON_PACK: &str = "usegateway";

pub const CAPTION: &str = "usegateway.caption";
pub const LINK_CAPTION: &str = "usegateway.link_caption";
pub const ERROR_EMPTY_PARAMS: &str = "usegateway.error_empty_params";
pub const ORDER_DESCRIPTION: &str = "usegateway.order_description";

/// Built-in strings for `language`; unknown languages get English.
pub fn builtin_lexicon(language: &str) -> Lexicon {
    match language {
        "russian-UTF8" | "russian" | "ru" => Lexicon::from_pairs([
            (CAPTION, "Оплата криптовалютой через Usegateway"),
            (LINK_CAPTION, "Ссылка на оплату"),
            (
                ERROR_EMPTY_PARAMS,
                "Оплата недоступна: не указан секретный ключ Usegateway",
            ),
            (ORDER_DESCRIPTION, "Оплата заказа"),
        ]),
        _ => Lexicon::from_pairs([
            (CAPTION, "Pay with crypto via Usegateway"),
            (LINK_CAPTION, "Payment link"),
            (
                ERROR_EMPTY_PARAMS,
                "Payment unavailable: the Usegateway secret key is not configured",
            ),
            (ORDER_DESCRIPTION, "Order payment"),
        ]),
    }
}
