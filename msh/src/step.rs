//! Composable state-threading steps.
//!
//! A [`Step`] is an inert description of a computation `state -> (value, state')`.
//! Nothing happens until [`Step::run`] is called with an initial state; chains
//! built with [`Step::bind`] run strictly left to right, each step receiving the
//! state produced by the one before it.
//!
//! Combinators are plain adapter structs, the same way iterator adapters are,
//! so a chain is a single concrete type. [`BoxStep`] erases that type when a
//! caller needs one step type across several branches.
//!
//! ```
//! use msh::step::{self, Step};
//!
//! let counter = step::from_fn(|n: u32| Ok((n, n + 1)));
//! let chain = counter.bind(|first| step::from_fn(move |n: u32| Ok((first + n, n * 10))));
//! let (value, state) = chain.run(1).unwrap();
//! assert_eq!((value, state), (3, 20));
//! ```

use crate::error::MshResult;
use std::fmt;
use std::marker::PhantomData;

/// A state-dependent computation producing an [`Output`](Step::Output) and a
/// new [`State`](Step::State).
///
/// Errors abort the whole chain: [`run`](Step::run) returns the first error
/// unchanged and no later step executes.
pub trait Step {
    type State;
    type Output;

    /// Execute the step against `state`.
    fn run(self, state: Self::State) -> MshResult<(Self::Output, Self::State)>;

    /// Run `self`, hand its value to `f`, then run the step `f` returns on the
    /// state `self` produced.
    fn bind<F, N>(self, f: F) -> Bind<Self, F>
    where
        Self: Sized,
        F: FnOnce(Self::Output) -> N,
        N: Step<State = Self::State>,
    {
        Bind { step: self, f }
    }

    /// Transform the value without touching the state.
    ///
    /// Equivalent to `self.bind(|v| unit(f(v)))`.
    fn map<F, B>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnOnce(Self::Output) -> B,
    {
        Map { step: self, f }
    }

    /// Erase the concrete step type.
    fn boxed<'a>(self) -> BoxStep<'a, Self::State, Self::Output>
    where
        Self: Sized + 'a,
    {
        BoxStep(Box::new(move |state| self.run(state)))
    }
}

/// Lift a value into a step that leaves the state untouched.
pub const fn unit<S, A>(value: A) -> Unit<S, A> {
    Unit {
        value,
        _state: PhantomData,
    }
}

/// Build a step from a plain function of the state.
pub fn from_fn<S, A, F>(f: F) -> FromFn<S, F>
where
    F: FnOnce(S) -> MshResult<(A, S)>,
{
    FromFn {
        f,
        _state: PhantomData,
    }
}

/// Yield a copy of the current state as the value.
pub const fn get<S: Clone>() -> Get<S> {
    Get {
        _state: PhantomData,
    }
}

/// Replace the state, yielding `()`.
pub const fn put<S>(state: S) -> Put<S> {
    Put { state }
}

/// See [`unit`].
pub struct Unit<S, A> {
    value: A,
    _state: PhantomData<fn(S) -> S>,
}

impl<S, A> Step for Unit<S, A> {
    type State = S;
    type Output = A;

    fn run(self, state: S) -> MshResult<(A, S)> {
        Ok((self.value, state))
    }
}

/// See [`from_fn`].
pub struct FromFn<S, F> {
    f: F,
    _state: PhantomData<fn(S) -> S>,
}

impl<S, A, F> Step for FromFn<S, F>
where
    F: FnOnce(S) -> MshResult<(A, S)>,
{
    type State = S;
    type Output = A;

    fn run(self, state: S) -> MshResult<(A, S)> {
        (self.f)(state)
    }
}

/// See [`get`].
pub struct Get<S> {
    _state: PhantomData<fn(S) -> S>,
}

impl<S: Clone> Step for Get<S> {
    type State = S;
    type Output = S;

    fn run(self, state: S) -> MshResult<(S, S)> {
        Ok((state.clone(), state))
    }
}

/// See [`put`].
pub struct Put<S> {
    state: S,
}

impl<S> Step for Put<S> {
    type State = S;
    type Output = ();

    fn run(self, _state: S) -> MshResult<((), S)> {
        Ok(((), self.state))
    }
}

/// See [`Step::bind`].
pub struct Bind<M, F> {
    step: M,
    f: F,
}

impl<M, F, N> Step for Bind<M, F>
where
    M: Step,
    F: FnOnce(M::Output) -> N,
    N: Step<State = M::State>,
{
    type State = M::State;
    type Output = N::Output;

    fn run(self, state: M::State) -> MshResult<(N::Output, M::State)> {
        let (value, state) = self.step.run(state)?;
        (self.f)(value).run(state)
    }
}

/// See [`Step::map`].
pub struct Map<M, F> {
    step: M,
    f: F,
}

impl<M, F, B> Step for Map<M, F>
where
    M: Step,
    F: FnOnce(M::Output) -> B,
{
    type State = M::State;
    type Output = B;

    fn run(self, state: M::State) -> MshResult<(B, M::State)> {
        let (value, state) = self.step.run(state)?;
        Ok(((self.f)(value), state))
    }
}

type BoxedFn<'a, S, A> = Box<dyn FnOnce(S) -> MshResult<(A, S)> + 'a>;

/// A type-erased step; see [`Step::boxed`].
pub struct BoxStep<'a, S, A>(BoxedFn<'a, S, A>);

impl<S, A> Step for BoxStep<'_, S, A> {
    type State = S;
    type Output = A;

    fn run(self, state: S) -> MshResult<(A, S)> {
        (self.0)(state)
    }
}

impl<S, A> fmt::Debug for BoxStep<'_, S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxStep").finish_non_exhaustive()
    }
}
