//! # Storage Keys
//!
//! The complete key namespace of the storage table. Every producer and
//! consumer goes through these constants; inline key strings are how
//! producer/consumer drift starts.

/// Ordered collection of [`mercato_core::ShippingAddress`] records.
pub const USER_SHIPPING_ADDRESSES: &str = "userShippingAddresses";

/// Id of the address currently selected for checkout, absent when the
/// address book is empty.
pub const SELECTED_SHIPPING_ADDRESS_ID: &str = "selectedShippingAddressId";

/// Collection of [`mercato_core::VoucherSelection`] records.
pub const SELECTED_VOUCHERS_DETAILS: &str = "selectedVouchersDetails";

/// Integer mirror of the voucher selection's length, written in the same
/// transaction as the details.
pub const SELECTED_VOUCHER_USER_COUNT: &str = "selectedVoucherUserCount";

/// One-shot [`mercato_core::OrderHandoff`] record: written by checkout,
/// read and deleted exactly once by the confirmation screen.
pub const FINAL_ORDER_DETAILS_FOR_PAYMENT: &str = "finalOrderDetailsForPayment";

/// Transient mirror of the cart at checkout time, cleared on successful
/// confirmation read.
pub const CHECKOUT_ITEMS: &str = "checkoutItems";

/// UI language preference, `"en" | "vi"`.
pub const LOCALE: &str = "locale";
