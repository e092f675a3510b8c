// SPDX-License-Identifier: Apache-2.0

//! Character classes, states, actions and the transition table of the parser.
//!
//! The parser classifies each input byte, then looks up
//! `TRANSITIONS[state][class]`. An entry either moves to another state, asks
//! the parser to perform an [`Action`], or rejects the input.

mod stack;

pub(crate) use stack::StateStack;

/// Coarse category of an input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Class {
    /// ` `
    Space,
    /// Tab, line feed, vertical tab, form feed, carriage return.
    White,
    CurlyOpen,
    CurlyClose,
    SquareOpen,
    SquareClose,
    Colon,
    Comma,
    Quote,
    Backslash,
    Slash,
    Dot,
    Plus,
    Minus,
    Zero,
    /// `1` to `9`
    Digit,
    /// `A`, `B`, `C`, `D`, `F`
    UpperHex,
    /// `E`
    UpperE,
    LowerA,
    LowerB,
    LowerE,
    LowerF,
    LowerL,
    LowerN,
    LowerR,
    LowerS,
    LowerT,
    LowerU,
    /// `c`, `d`: only meaningful as hex digits.
    LowerCd,
    /// Everything else, including all bytes above 127.
    Etc,
}

/// Parser states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// Before the top-level container.
    Start,
    /// Just inside `{`: a name or `}`.
    Object,
    /// Just inside `[`: a value or `]`.
    Array,
    /// After a comma in an object: a name.
    NameStart,
    NameBackslash,
    Name,
    /// After a name: the colon.
    Colon,
    /// After a colon or an array comma: a value.
    Value,
    /// After a value: a comma or a closing bracket.
    ValueEnd,
    String,
    StringBackslash,
    True1,
    True2,
    True3,
    False1,
    False2,
    False3,
    False4,
    Null1,
    Null2,
    Null3,
    /// Minus sign seen.
    Minus,
    /// Integer part starting with 1-9.
    IntDigits,
    /// Integer part `0`.
    IntZero,
    /// Decimal point seen.
    Point,
    /// `e` or `E` seen.
    Exponent,
    /// Exponent sign seen.
    ExponentSign,
    FracDigits,
    ExponentDigits,
    Unicode1,
    Unicode2,
    Unicode3,
    Unicode4,
    /// The top-level container has been closed.
    Finish,
}

/// Side effects requested by the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// `{`: push, go to `Object`.
    ObjectStart,
    /// `}`: pop, go to `ValueEnd` or `Finish`.
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    /// A plain name byte.
    NameChar,
    /// Closing quote of a name, go to `Colon`.
    NameEnd,
    /// Opening quote of a string value.
    StringStart,
    /// Closing quote of a string value, go to `ValueEnd`.
    StringEnd,
    True,
    False,
    Null,
    /// Go to `NameStart` inside an object, `Value` inside an array.
    Comma,
    /// Number starts with `-`.
    NumberMinus,
    /// Number starts with `0`.
    NumberZero,
    /// Number starts with 1-9.
    NumberDigit,
    /// The byte ends a number and is examined again.
    NumberEnd,
    /// Second byte of a two-byte escape.
    Escape,
    /// Backslash inside a string value.
    StringBackslash,
    /// `u` of a `\u` escape.
    UnicodeStart,
    /// Last hex digit of a `\u` escape.
    UnicodeEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    To(State),
    Do(Action),
    Error,
}

/// Class of `byte`, or `None` for control bytes that are never valid.
pub(crate) fn classify(byte: u8) -> Option<Class> {
    match CLASSES.get(usize::from(byte)) {
        Some(class) => *class,
        None => Some(Class::Etc),
    }
}

pub(crate) fn transition(state: State, class: Class) -> Transition {
    TRANSITIONS
        .get(state as usize)
        .and_then(|row| row.get(class as usize))
        .copied()
        .unwrap_or(Transition::Error)
}

const CLASS_COUNT: usize = Class::Etc as usize + 1;
const STATE_COUNT: usize = State::Finish as usize + 1;

#[rustfmt::skip]
static CLASSES: [Option<Class>; 128] = {
    use Class::*;
    const ER: Option<Class> = None;
    const SP: Option<Class> = Some(Space);
    const WH: Option<Class> = Some(White);
    const ET: Option<Class> = Some(Etc);
    const DG: Option<Class> = Some(Digit);
    const HX: Option<Class> = Some(UpperHex);
    [
        ER, ER, ER, ER, ER, ER, ER, ER,                 //   0 -   7
        ET, WH, WH, WH, WH, WH, ET, ET,                 //   8 -  15
        ER, ER, ER, ER, ER, ER, ER, ER,                 //  16 -  23
        ER, ER, ER, ER, ER, ER, ER, ER,                 //  24 -  31
        SP, ET, Some(Quote), ET, ET, ET, ET, ET,        //  32 -  39
        ET, ET, ET, Some(Plus), Some(Comma), Some(Minus), Some(Dot), Some(Slash), //  40 -  47
        Some(Zero), DG, DG, DG, DG, DG, DG, DG,         //  48 -  55
        DG, DG, Some(Colon), ET, ET, ET, ET, ET,        //  56 -  63
        ET, HX, HX, HX, HX, Some(UpperE), HX, ET,       //  64 -  71
        ET, ET, ET, ET, ET, ET, ET, ET,                 //  72 -  79
        ET, ET, ET, ET, ET, ET, ET, ET,                 //  80 -  87
        ET, ET, ET, Some(SquareOpen), Some(Backslash), Some(SquareClose), ET, ET, //  88 -  95
        ET, Some(LowerA), Some(LowerB), Some(LowerCd), Some(LowerCd), Some(LowerE), Some(LowerF), ET, //  96 - 103
        ET, ET, ET, ET, Some(LowerL), ET, Some(LowerN), ET, // 104 - 111
        ET, ET, Some(LowerR), Some(LowerS), Some(LowerT), Some(LowerU), ET, ET, // 112 - 119
        ET, ET, ET, Some(CurlyOpen), ET, Some(CurlyClose), ET, ET, // 120 - 127
    ]
};

#[rustfmt::skip]
#[allow(non_upper_case_globals)]
static TRANSITIONS: [[Transition; CLASS_COUNT]; STATE_COUNT] = {
    use Transition::{Do, To};
    const __: Transition = Transition::Error;

    const GO: Transition = To(State::Start);
    const OJ: Transition = To(State::Object);
    const AR: Transition = To(State::Array);
    const NA: Transition = To(State::NameStart);
    const NB: Transition = To(State::NameBackslash);
    const NM: Transition = To(State::Name);
    const CO: Transition = To(State::Colon);
    const VL: Transition = To(State::Value);
    const VE: Transition = To(State::ValueEnd);
    const ST: Transition = To(State::String);
    const T1: Transition = To(State::True1);
    const T2: Transition = To(State::True2);
    const T3: Transition = To(State::True3);
    const F1: Transition = To(State::False1);
    const F2: Transition = To(State::False2);
    const F3: Transition = To(State::False3);
    const F4: Transition = To(State::False4);
    const N1: Transition = To(State::Null1);
    const N2: Transition = To(State::Null2);
    const N3: Transition = To(State::Null3);
    const DB: Transition = To(State::IntDigits);
    const DC: Transition = To(State::IntZero);
    const DD: Transition = To(State::Point);
    const DE: Transition = To(State::Exponent);
    const DF: Transition = To(State::ExponentSign);
    const DG: Transition = To(State::FracDigits);
    const DH: Transition = To(State::ExponentDigits);
    const U2: Transition = To(State::Unicode2);
    const U3: Transition = To(State::Unicode3);
    const U4: Transition = To(State::Unicode4);
    const FI: Transition = To(State::Finish);

    const Xo: Transition = Do(Action::ObjectStart);
    const XO: Transition = Do(Action::ObjectEnd);
    const Xa: Transition = Do(Action::ArrayStart);
    const XA: Transition = Do(Action::ArrayEnd);
    const Xn: Transition = Do(Action::NameChar);
    const XN: Transition = Do(Action::NameEnd);
    const Xs: Transition = Do(Action::StringStart);
    const XS: Transition = Do(Action::StringEnd);
    const XT: Transition = Do(Action::True);
    const XF: Transition = Do(Action::False);
    const XL: Transition = Do(Action::Null);
    const XC: Transition = Do(Action::Comma);
    const Xm: Transition = Do(Action::NumberMinus);
    const Xz: Transition = Do(Action::NumberZero);
    const Xd: Transition = Do(Action::NumberDigit);
    const XD: Transition = Do(Action::NumberEnd);
    const Xe: Transition = Do(Action::Escape);
    const XB: Transition = Do(Action::StringBackslash);
    const Xu: Transition = Do(Action::UnicodeStart);
    const XU: Transition = Do(Action::UnicodeEnd);

    //        space white {   }   [   ]   :   ,   "   \   /   .   +   -   0  1-9 ABCDF E  a   b   e   f   l   n   r   s   t   u   cd  etc
    [
        /* GO */ [GO, GO, Xo, __, Xa, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
        /* OJ */ [OJ, OJ, __, XO, __, __, __, __, NM, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
        /* AR */ [AR, AR, Xo, __, Xa, XA, __, __, Xs, __, __, __, __, Xm, Xz, Xd, __, __, __, __, __, F1, __, N1, __, __, T1, __, __, __],
        /* NA */ [NA, NA, __, __, __, __, __, __, NM, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
        /* NB */ [__, __, __, __, __, __, __, __, Xe, Xe, Xe, __, __, __, __, __, __, __, __, Xe, __, Xe, __, Xe, Xe, __, Xe, Xu, __, __],
        /* NM */ [Xn, __, Xn, Xn, Xn, Xn, Xn, Xn, XN, NB, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn, Xn],
        /* CO */ [CO, CO, __, __, __, __, VL, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
        /* VL */ [VL, VL, Xo, __, Xa, __, __, __, Xs, __, __, __, __, Xm, Xz, Xd, __, __, __, __, __, F1, __, N1, __, __, T1, __, __, __],
        /* VE */ [VE, VE, __, XO, __, XA, __, XC, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
        /* ST */ [ST, __, ST, ST, ST, ST, ST, ST, XS, XB, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST],
        /* SB */ [__, __, __, __, __, __, __, __, Xe, Xe, Xe, __, __, __, __, __, __, __, __, Xe, __, Xe, __, Xe, Xe, __, Xe, Xu, __, __],
        /* T1 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, T2, __, __, __, __, __],
        /* T2 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, T3, __, __],
        /* T3 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, XT, __, __, __, __, __, __, __, __, __],
        /* F1 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, F2, __, __, __, __, __, __, __, __, __, __, __],
        /* F2 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, F3, __, __, __, __, __, __, __],
        /* F3 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, F4, __, __, __, __],
        /* F4 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, XF, __, __, __, __, __, __, __, __, __],
        /* N1 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, N2, __, __],
        /* N2 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, N3, __, __, __, __, __, __, __],
        /* N3 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, XL, __, __, __, __, __, __, __],
        /* DA */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, DC, DB, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
        /* DB */ [XD, XD, __, XD, __, XD, __, XD, __, __, __, DD, __, __, DB, DB, __, DE, __, __, DE, __, __, __, __, __, __, __, __, __],
        /* DC */ [XD, XD, __, XD, __, XD, __, XD, __, __, __, DD, __, __, __, __, __, DE, __, __, DE, __, __, __, __, __, __, __, __, __],
        /* DD */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, DG, DG, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
        /* DE */ [__, __, __, __, __, __, __, __, __, __, __, __, DF, DF, DH, DH, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
        /* DF */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, DH, DH, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
        /* DG */ [XD, XD, __, XD, __, XD, __, XD, __, __, __, __, __, __, DG, DG, __, DE, __, __, DE, __, __, __, __, __, __, __, __, __],
        /* DH */ [XD, XD, __, XD, __, XD, __, XD, __, __, __, __, __, __, DH, DH, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
        /* U1 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, U2, U2, U2, U2, U2, U2, U2, U2, __, __, __, __, __, __, U2, __],
        /* U2 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, U3, U3, U3, U3, U3, U3, U3, U3, __, __, __, __, __, __, U3, __],
        /* U3 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, U4, U4, U4, U4, U4, U4, U4, U4, __, __, __, __, __, __, U4, __],
        /* U4 */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, XU, XU, XU, XU, XU, XU, XU, XU, __, __, __, __, __, __, XU, __],
        /* FI */ [FI, FI, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    ]
};
