/// Identity of the freelancer placing the bid.
pub const BIDDER_FIELD: &str = "biddingEmail";
/// Identity of the job poster receiving the bid.
pub const CLIENT_FIELD: &str = "clientEmail";
