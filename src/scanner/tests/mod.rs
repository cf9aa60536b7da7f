//! Test modules for the scanner system
//!
//! Manager tests drive both operations end to end against the in-process fake
//! provider; type tests pin the serialized document shapes.
