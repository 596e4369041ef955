//! Route definitions for the application

use dioxus::prelude::*;

use crate::components::SiteLayout;
use crate::pages::account::{AccountSecurity, AuthComplete, PasswordReset, SignIn, SignUp};
use crate::pages::public::{
    About, Admissions, Booking, Clients, Contact, Home, ServiceDetail, Services, Testimonials,
};

/// All application routes
#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[layout(SiteLayout)]
        #[route("/")]
        Home {},

        #[route("/about")]
        About {},

        #[route("/services")]
        Services {},

        #[route("/services/:id")]
        ServiceDetail { id: String },

        #[route("/admissions")]
        Admissions {},

        #[route("/testimonials")]
        Testimonials {},

        #[route("/clients")]
        Clients {},

        #[route("/contact")]
        Contact {},

        #[route("/booking")]
        Booking {},

        // Account
        #[route("/signin")]
        SignIn {},

        #[route("/signup")]
        SignUp {},

        #[route("/password-reset")]
        PasswordReset {},

        #[route("/account/security")]
        AccountSecurity {},

        // Google sign-in lands here with either a token or an error code
        #[route("/auth/complete?:token&:next&:error&:pending&:enrollment")]
        AuthComplete {
            token: String,
            next: String,
            error: String,
            pending: String,
            enrollment: String,
        },
    #[end_layout]
}
