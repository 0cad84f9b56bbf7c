mod errors;
mod fields;
mod forms;

pub use errors::{FieldViolation, ValidationError};
pub use forms::{
    EmailUpdateInput, EmailUpdateSchema, EmptySchema, MagicLinkInput, MagicLinkSchema,
    MagicLinkVerifyInput, MagicLinkVerifySchema, OAuthCallbackInput, OAuthCallbackSchema,
    OAuthStartInput, OAuthStartSchema, PasswordUpdateInput, PasswordUpdateSchema,
    PhoneOtpSendInput, PhoneOtpSendSchema, PhoneOtpVerifyInput, PhoneOtpVerifySchema,
    ProfileUpdateInput, ProfileUpdateSchema, Schema, SignInInput, SignInSchema, SignUpInput,
    SignUpSchema,
};
